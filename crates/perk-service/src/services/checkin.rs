//! Check-in service - orchestrates the five check-in phases
//!
//! Token gate, geofence gate, identity resolution, transactional
//! settlement, then best-effort notification. The first failing phase
//! aborts the check-in with nothing persisted; in particular the token is
//! only consumed inside the settlement transaction, so a rejected check-in
//! leaves it redeemable.

use perk_core::geo::Coordinate;
use perk_core::DomainError;
use tracing::{error, info, instrument};

use crate::dto::{CheckinRequest, CheckinResponse, CustomerResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notify::RewardNotice;

/// Service handling the customer-facing check-in flow
#[derive(Clone)]
pub struct CheckinService {
    ctx: ServiceContext,
}

impl CheckinService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one check-in end to end
    #[instrument(skip(self, request), fields(phone = %request.phone))]
    pub async fn check_in(&self, request: &CheckinRequest) -> ServiceResult<CheckinResponse> {
        // Token gate: a pre-check without consuming, so the common rejection
        // paths never open a transaction. The settlement re-checks and
        // consumes atomically.
        let status = self.ctx.token_repo().validate(&request.token).await?;
        if let Some(rejection) = status.rejection() {
            return Err(rejection.into());
        }

        self.enforce_geofence(request)?;

        let customer = self
            .ctx
            .customer_repo()
            .find_or_create(&request.name, &request.phone, &request.email)
            .await?;

        let outcome = self
            .ctx
            .ledger_repo()
            .settle_checkin(&request.token, customer.id, self.ctx.checkin_policy())
            .await?;

        info!(
            customer_id = outcome.customer.id,
            earned_reward = outcome.earned_reward(),
            total_visits = outcome.customer.total_visits,
            "check-in settled"
        );

        if let Some(reward) = &outcome.reward {
            self.spawn_reward_notification(&outcome.customer, &reward.reward_type);
        }

        let threshold = self.ctx.checkin_policy().reward_threshold;
        let earned_reward = outcome.earned_reward();
        let points_to_next_reward = outcome.customer.points_to_next_reward(threshold);
        let message = if earned_reward {
            format!(
                "Welcome back, {}! You earned a free coffee!",
                outcome.customer.name
            )
        } else {
            format!(
                "Welcome back, {}! {} more visit(s) until your next reward.",
                outcome.customer.name, points_to_next_reward
            )
        };

        Ok(CheckinResponse {
            message,
            customer: CustomerResponse::from(outcome.customer),
            earned_reward,
            points_to_next_reward,
        })
    }

    /// Geofence gate
    ///
    /// When enforcement is on, coordinates are required and must fall
    /// inside the store fence; when off, the phase is skipped entirely.
    fn enforce_geofence(&self, request: &CheckinRequest) -> ServiceResult<()> {
        if !self.ctx.geofence_enforced() {
            return Ok(());
        }

        let (latitude, longitude) = match (request.latitude, request.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(DomainError::Validation(
                    "Location is required for check-in".to_string(),
                )
                .into())
            }
        };

        let point = Coordinate::new(latitude, longitude)?;
        let check = self.ctx.geofence().check(point);
        if !check.within {
            return Err(DomainError::TooFarFromStore {
                distance_meters: check.distance_meters,
            }
            .into());
        }

        Ok(())
    }

    /// Fire-and-forget reward notification; failures are logged by the
    /// dispatcher, never surfaced to the check-in response.
    fn spawn_reward_notification(&self, customer: &perk_core::Customer, reward_type: &str) {
        let dispatcher = self.ctx.dispatcher_handle();
        let notice = RewardNotice {
            customer_name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            reward_type: reward_type.to_string(),
            total_rewards: customer.total_rewards,
        };

        tokio::spawn(async move {
            if dispatcher.dispatch(&notice).await.is_none() {
                error!(customer = %notice.customer_name, "reward notification undelivered");
            }
        });
    }
}
