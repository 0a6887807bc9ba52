//! Token service - QR token issuance and validation

use perk_core::entities::{generate_token_code, QrToken};
use perk_core::traits::TokenStatus;
use tracing::{info, instrument};

use crate::dto::{GenerateTokenRequest, TokenIssuedResponse, TokenValidationResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Service handling QR token issuance and validation
#[derive(Clone)]
pub struct TokenService {
    ctx: ServiceContext,
}

impl TokenService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a fresh token
    ///
    /// A short-lived token defaults to the configured validity window when
    /// the request omits one; a permanent token ignores the window and is
    /// meant for printed kiosk codes.
    #[instrument(skip(self, request), fields(permanent = request.permanent))]
    pub async fn issue(&self, request: &GenerateTokenRequest) -> ServiceResult<TokenIssuedResponse> {
        let token = if request.permanent {
            QrToken::permanent(generate_token_code())
        } else {
            let validity = request
                .validity_seconds
                .unwrap_or_else(|| self.ctx.default_token_validity_seconds());
            QrToken::new(generate_token_code(), validity)
        };

        self.ctx.token_repo().create(&token).await?;

        info!(permanent = token.permanent, "QR token issued");

        Ok(TokenIssuedResponse {
            permanent: token.permanent,
            expires_at: (!token.permanent).then_some(token.expires_at),
            valid_for: (!token.permanent).then(|| token.remaining_seconds()),
            token: token.token,
        })
    }

    /// Classify a presented token without consuming it
    ///
    /// Always resolves to a response: invalid tokens answer `valid: false`
    /// with a reason instead of an error, so the kiosk page can prompt a
    /// re-scan.
    #[instrument(skip(self))]
    pub async fn validate(&self, token: &str) -> ServiceResult<TokenValidationResponse> {
        let status = self.ctx.token_repo().validate(token).await?;

        Ok(match status {
            TokenStatus::Valid {
                remaining_seconds,
                permanent,
            } => TokenValidationResponse {
                valid: true,
                reason: None,
                remaining_time: Some(remaining_seconds),
                permanent: Some(permanent),
            },
            rejected => TokenValidationResponse {
                valid: false,
                reason: rejected.rejection().map(|e| e.to_string()),
                remaining_time: None,
                permanent: None,
            },
        })
    }

    /// Delete all expired tokens, returning the number removed
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self) -> ServiceResult<u64> {
        let removed = self.ctx.token_repo().delete_expired().await?;
        if removed > 0 {
            info!(removed, "swept expired QR tokens");
        }
        Ok(removed)
    }
}
