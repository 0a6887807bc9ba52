//! Admin key extractor
//!
//! Guards the issuance and dashboard endpoints with a shared API key
//! carried in the `x-admin-key` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use perk_common::AppError;

use crate::response::ApiError;
use crate::state::AppState;

/// Header carrying the admin API key
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Extractor proving the caller presented the configured admin key
///
/// Missing header answers 401 `MISSING_ADMIN_KEY`, wrong key 401
/// `INVALID_ADMIN_KEY`.
#[derive(Debug, Clone, Copy)]
pub struct AdminKey;

#[async_trait]
impl FromRequestParts<AppState> for AdminKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::App(AppError::MissingAdminKey))?;

        if provided != state.admin_api_key() {
            return Err(ApiError::App(AppError::InvalidAdminKey));
        }

        Ok(AdminKey)
    }
}
