//! PostgreSQL implementation of TokenRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use perk_core::entities::QrToken;
use perk_core::traits::{RepoResult, TokenRepository, TokenStatus};

use crate::models::QrTokenModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TokenRepository
#[derive(Clone)]
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    /// Create a new PgTokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    #[instrument(skip(self, token), fields(permanent = token.permanent))]
    async fn create(&self, token: &QrToken) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO qr_tokens (token, permanent, used, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&token.token)
        .bind(token.permanent)
        .bind(token.used)
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // A 32-char CSPRNG code colliding means something is deeply
            // wrong; surface it rather than retrying silently.
            map_unique_violation(e, || {
                perk_core::DomainError::InternalError("token code collision".to_string())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, token: &str) -> RepoResult<Option<QrToken>> {
        let result = sqlx::query_as::<_, QrTokenModel>(
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

        Ok(result.map(QrToken::from))
    }

    #[instrument(skip(self))]
    async fn validate(&self, token: &str) -> RepoResult<TokenStatus> {
        let Some(record) = self.find(token).await? else {
            return Ok(TokenStatus::NotFound);
        };

        // Expiry is checked before the used flag so a stale token reads as
        // expired rather than replayed
        if record.is_expired() {
            Ok(TokenStatus::Expired)
        } else if record.used {
            Ok(TokenStatus::AlreadyUsed)
        } else {
            Ok(TokenStatus::Valid {
                remaining_seconds: record.remaining_seconds(),
                permanent: record.permanent,
            })
        }
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM qr_tokens
            WHERE expires_at < NOW()
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
