//! PostgreSQL implementation of LedgerRepository
//!
//! Owns the check-in critical section: conditional token consumption and
//! per-customer settlement run inside one transaction, so either both
//! commit or neither does.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use perk_core::entities::{Customer, Reward, Visit, FREE_COFFEE};
use perk_core::error::DomainError;
use perk_core::traits::{CheckinPolicy, LedgerRepository, RepoResult, SettlementOutcome};

use crate::models::{CustomerModel, QrTokenModel, RewardModel, VisitModel};

use super::error::map_db_error;

/// PostgreSQL implementation of LedgerRepository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    /// Create a new PgLedgerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Explain why the conditional consume affected zero rows
    ///
    /// Read outside the settlement transaction; the consume itself already
    /// failed, this only picks the rejection reason for the caller.
    async fn classify_consume_failure(&self, token: &str) -> RepoResult<DomainError> {
        let record = sqlx::query_as::<_, QrTokenModel>(
            r"
            SELECT token, permanent, used, created_at, expires_at
            FROM qr_tokens
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(match record {
            None => DomainError::TokenNotFound,
            Some(r) if r.is_expired() => DomainError::TokenExpired,
            Some(_) => DomainError::TokenAlreadyUsed,
        })
    }

    /// Reject when the newest visit falls inside the cooldown window
    async fn check_cooldown(
        tx: &mut Transaction<'_, Postgres>,
        customer_id: i64,
        policy: CheckinPolicy,
    ) -> RepoResult<()> {
        let last_visit: Option<chrono::DateTime<Utc>> = sqlx::query_scalar(
            r"
            SELECT MAX(visit_date) FROM loyalty_visits WHERE customer_id = $1
            ",
        )
        .bind(customer_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        let Some(last_visit) = last_visit else {
            return Ok(());
        };

        let cooldown = Duration::from_std(policy.cooldown)
            .map_err(|e| DomainError::InternalError(format!("cooldown out of range: {e}")))?;
        let elapsed = Utc::now() - last_visit;

        if elapsed < cooldown {
            return Err(DomainError::TooSoon {
                retry_after_seconds: (cooldown - elapsed).num_seconds().max(1),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl LedgerRepository for PgLedgerRepository {
    #[instrument(skip(self), fields(customer_id))]
    async fn settle_checkin(
        &self,
        token: &str,
        customer_id: i64,
        policy: CheckinPolicy,
    ) -> RepoResult<SettlementOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Conditional consume: the affected-row check closes the race
        // between two requests that both passed validation. The row lock
        // taken here also serializes any concurrent consumer of this token
        // until we commit or roll back.
        let consumed = sqlx::query(
            r"
            UPDATE qr_tokens
            SET used = TRUE
            WHERE token = $1 AND used = FALSE AND expires_at > NOW()
            ",
        )
        .bind(token)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if consumed.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(self.classify_consume_failure(token).await?);
        }

        // Per-customer serialization: concurrent check-ins for one phone
        // queue on this row lock, so neither reads stale points.
        let locked = sqlx::query_as::<_, CustomerModel>(
            r"
            SELECT id, name, phone, email, total_visits, current_points,
                   total_rewards, created_at, updated_at
            FROM loyalty_customers
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(customer_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::CustomerNotFound(customer_id))?;

        Self::check_cooldown(&mut tx, customer_id, policy).await?;

        let visit = sqlx::query_as::<_, VisitModel>(
            r"
            INSERT INTO loyalty_visits (customer_id, points_earned)
            VALUES ($1, $2)
            RETURNING id, customer_id, visit_date, points_earned
            ",
        )
        .bind(customer_id)
        .bind(policy.points_per_visit)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let mut customer = Customer::from(locked);
        let earned_reward = customer.settle_visit(policy.points_per_visit, policy.reward_threshold);

        sqlx::query(
            r"
            UPDATE loyalty_customers
            SET total_visits = $2, current_points = $3, total_rewards = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(customer.id)
        .bind(customer.total_visits)
        .bind(customer.current_points)
        .bind(customer.total_rewards)
        .bind(customer.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let reward = if earned_reward {
            let row = sqlx::query_as::<_, RewardModel>(
                r"
                INSERT INTO loyalty_rewards (customer_id, reward_type, points_used)
                VALUES ($1, $2, $3)
                RETURNING id, customer_id, reward_type, points_used, redeemed_at
                ",
            )
            .bind(customer.id)
            .bind(FREE_COFFEE)
            .bind(policy.reward_threshold)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
            Some(Reward::from(row))
        } else {
            None
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(SettlementOutcome {
            customer,
            visit: Visit::from(visit),
            reward,
        })
    }

    #[instrument(skip(self))]
    async fn list_visits(&self, limit: i64, offset: i64) -> RepoResult<Vec<Visit>> {
        let results = sqlx::query_as::<_, VisitModel>(
            r"
            SELECT id, customer_id, visit_date, points_earned
            FROM loyalty_visits
            ORDER BY visit_date DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Visit::from).collect())
    }

    #[instrument(skip(self))]
    async fn visits_for_customer(&self, customer_id: i64) -> RepoResult<Vec<Visit>> {
        let results = sqlx::query_as::<_, VisitModel>(
            r"
            SELECT id, customer_id, visit_date, points_earned
            FROM loyalty_visits
            WHERE customer_id = $1
            ORDER BY visit_date DESC
            ",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Visit::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_rewards(&self, limit: i64, offset: i64) -> RepoResult<Vec<Reward>> {
        let results = sqlx::query_as::<_, RewardModel>(
            r"
            SELECT id, customer_id, reward_type, points_used, redeemed_at
            FROM loyalty_rewards
            ORDER BY redeemed_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reward::from).collect())
    }
}
