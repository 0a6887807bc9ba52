//! PostgreSQL implementation of CustomerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use perk_core::entities::Customer;
use perk_core::error::DomainError;
use perk_core::traits::{CustomerRepository, RepoResult};

use crate::models::CustomerModel;

use super::error::{map_db_error, map_unique_violation};

const SELECT_COLUMNS: &str = "id, name, phone, email, total_visits, current_points, \
                              total_rewards, created_at, updated_at";

/// PostgreSQL implementation of CustomerRepository
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    /// Create a new PgCustomerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Customer>> {
        let result = sqlx::query_as::<_, CustomerModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM loyalty_customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Customer::from))
    }

    #[instrument(skip(self))]
    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Customer>> {
        let result = sqlx::query_as::<_, CustomerModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM loyalty_customers WHERE phone = $1"
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Customer::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str, phone: &str, email: &str) -> RepoResult<Customer> {
        let result = sqlx::query_as::<_, CustomerModel>(&format!(
            r"
            INSERT INTO loyalty_customers (name, phone, email)
            VALUES ($1, $2, $3)
            RETURNING {SELECT_COLUMNS}
            "
        ))
        .bind(name)
        .bind(phone)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::PhoneConflict))?;

        Ok(Customer::from(result))
    }

    #[instrument(skip(self))]
    async fn find_or_create(&self, name: &str, phone: &str, email: &str) -> RepoResult<Customer> {
        if let Some(existing) = self.find_by_phone(phone).await? {
            return Ok(existing);
        }

        match self.create(name, phone, email).await {
            Ok(created) => Ok(created),
            // A concurrent request created the row between our lookup and
            // insert; the phone key wins, so fetch the winner.
            Err(DomainError::PhoneConflict) => self
                .find_by_phone(phone)
                .await?
                .ok_or_else(|| DomainError::InternalError("customer vanished after conflict".to_string())),
            Err(other) => Err(other),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<Customer>> {
        let results = sqlx::query_as::<_, CustomerModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM loyalty_customers
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Customer::from).collect())
    }
}
