//! Customer service - registration and admin dashboard queries

use tracing::{info, instrument};

use crate::dto::{CustomerResponse, RegisterRequest, RewardResponse, VisitResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Service handling registration and the admin read side
#[derive(Clone)]
pub struct CustomerService {
    ctx: ServiceContext,
}

impl CustomerService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Pre-register a customer with zeroed counters
    ///
    /// No token required; duplicate phones answer `PhoneConflict` (409)
    /// rather than silently merging.
    #[instrument(skip(self, request), fields(phone = %request.phone))]
    pub async fn register(&self, request: &RegisterRequest) -> ServiceResult<CustomerResponse> {
        let customer = self
            .ctx
            .customer_repo()
            .create(&request.name, &request.phone, &request.email)
            .await?;

        info!(customer_id = customer.id, "customer registered");
        Ok(CustomerResponse::from(customer))
    }

    /// List customers, newest first
    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<CustomerResponse>> {
        let customers = self.ctx.customer_repo().list(limit, offset).await?;
        Ok(customers.into_iter().map(CustomerResponse::from).collect())
    }

    /// Visit history for one customer, newest first
    #[instrument(skip(self))]
    pub async fn customer_visits(&self, customer_id: i64) -> ServiceResult<Vec<VisitResponse>> {
        // Answer 404 for unknown ids instead of an empty list
        if self
            .ctx
            .customer_repo()
            .find_by_id(customer_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Customer", customer_id.to_string()));
        }

        let visits = self
            .ctx
            .ledger_repo()
            .visits_for_customer(customer_id)
            .await?;
        Ok(visits.into_iter().map(VisitResponse::from).collect())
    }

    /// List visits across all customers, newest first
    #[instrument(skip(self))]
    pub async fn list_visits(&self, limit: i64, offset: i64) -> ServiceResult<Vec<VisitResponse>> {
        let visits = self.ctx.ledger_repo().list_visits(limit, offset).await?;
        Ok(visits.into_iter().map(VisitResponse::from).collect())
    }

    /// List rewards, newest first
    #[instrument(skip(self))]
    pub async fn list_rewards(
        &self,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<RewardResponse>> {
        let rewards = self.ctx.ledger_repo().list_rewards(limit, offset).await?;
        Ok(rewards.into_iter().map(RewardResponse::from).collect())
    }
}
