//! QR token handlers
//!
//! Endpoints for token issuance (admin) and validation (kiosk page).

use axum::{extract::State, Json};
use perk_service::{
    GenerateTokenRequest, TokenIssuedResponse, TokenService, TokenValidationResponse,
    ValidateTokenRequest,
};

use crate::extractors::{AdminKey, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Issue a fresh QR token
///
/// POST /api/qr/generate
pub async fn generate_token(
    State(state): State<AppState>,
    _admin: AdminKey,
    ValidatedJson(request): ValidatedJson<GenerateTokenRequest>,
) -> ApiResult<Created<Json<TokenIssuedResponse>>> {
    let service = TokenService::new(state.service_context().clone());
    let response = service.issue(&request).await?;
    Ok(Created(Json(response)))
}

/// Classify a presented token without consuming it
///
/// POST /api/qr/validate
pub async fn validate_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ValidateTokenRequest>,
) -> ApiResult<Json<TokenValidationResponse>> {
    let service = TokenService::new(state.service_context().clone());
    let response = service.validate(&request.token).await?;
    Ok(Json(response))
}
