//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    // =========================================================================
    // Token Rejections
    // =========================================================================
    #[error("QR token not found, please re-scan the code")]
    TokenNotFound,

    #[error("QR token has expired, please re-scan the code")]
    TokenExpired,

    #[error("QR token was already used, please re-scan the code")]
    TokenAlreadyUsed,

    // =========================================================================
    // Check-in Rejections
    // =========================================================================
    #[error("You are {distance_meters:.0} m from the store, too far to check in")]
    TooFarFromStore { distance_meters: f64 },

    #[error("You already checked in recently, try again in {retry_after_seconds} seconds")]
    TooSoon { retry_after_seconds: i64 },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Conflict / Not Found
    // =========================================================================
    #[error("Phone number is already registered")]
    PhoneConflict,

    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenAlreadyUsed => "TOKEN_ALREADY_USED",
            Self::TooFarFromStore { .. } => "TOO_FAR_FROM_STORE",
            Self::TooSoon { .. } => "TOO_SOON",
            Self::InvalidCoordinate(_) => "INVALID_COORDINATE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PhoneConflict => "PHONE_ALREADY_REGISTERED",
            Self::CustomerNotFound(_) => "UNKNOWN_CUSTOMER",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a token rejection ("please re-scan" guidance)
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Self::TokenNotFound | Self::TokenExpired | Self::TokenAlreadyUsed
        )
    }

    /// Check if this is a validation error (rejected before storage access)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidCoordinate(_) | Self::Validation(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::PhoneConflict)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CustomerNotFound(_))
    }
}
