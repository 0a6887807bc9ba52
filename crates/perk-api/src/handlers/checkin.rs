//! Loyalty handlers
//!
//! Endpoints for the customer-facing check-in flow and pre-registration.

use axum::{extract::State, Json};
use perk_service::{
    CheckinRequest, CheckinResponse, CheckinService, CustomerResponse, CustomerService,
    RegisterRequest,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Run one check-in end to end
///
/// POST /api/loyalty/checkin
pub async fn check_in(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CheckinRequest>,
) -> ApiResult<Json<CheckinResponse>> {
    let service = CheckinService::new(state.service_context().clone());
    let response = service.check_in(&request).await?;
    Ok(Json(response))
}

/// Pre-register a customer before their first visit
///
/// POST /api/loyalty/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<CustomerResponse>>> {
    let service = CustomerService::new(state.service_context().clone());
    let response = service.register(&request).await?;
    Ok(Created(Json(response)))
}
