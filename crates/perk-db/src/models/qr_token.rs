//! QrToken database model

use chrono::{DateTime, Utc};
use perk_core::entities::QrToken;
use sqlx::FromRow;

/// Database model for the qr_tokens table
#[derive(Debug, Clone, FromRow)]
pub struct QrTokenModel {
    pub token: String,
    pub permanent: bool,
    pub used: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl QrTokenModel {
    /// Check if the token has expired
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Seconds until expiry, clamped to zero
    #[inline]
    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

impl From<QrTokenModel> for QrToken {
    fn from(model: QrTokenModel) -> Self {
        QrToken {
            token: model.token,
            permanent: model.permanent,
            used: model.used,
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}
