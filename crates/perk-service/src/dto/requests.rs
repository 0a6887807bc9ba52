//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying user input also
//! implement `Validate` so malformed requests are rejected before any
//! storage access.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// QR Token Requests
// ============================================================================

/// Admin-triggered token issuance request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateTokenRequest {
    /// Validity window in seconds; server default applies when omitted
    #[validate(range(min = 1, max = 86400, message = "Validity must be 1-86400 seconds"))]
    pub validity_seconds: Option<i64>,

    /// Issue a permanently valid static kiosk code instead
    #[serde(default)]
    pub permanent: bool,
}

/// Token validation request (kiosk page polls this before showing the form)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ValidateTokenRequest {
    #[validate(length(min = 1, max = 64, message = "Token must be 1-64 characters"))]
    pub token: String,
}

// ============================================================================
// Loyalty Requests
// ============================================================================

/// Check-in submission from the customer-facing form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckinRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(length(min = 7, max = 32, message = "Phone must be 7-32 characters"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 64, message = "Token must be 1-64 characters"))]
    pub token: String,

    /// Geolocation is optional at the transport level; whether it is
    /// required is decided by the geofence enforcement policy
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Pre-registration request (no token required, zero points)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(length(min = 7, max = 32, message = "Phone must be 7-32 characters"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkin_request_validation() {
        let valid = CheckinRequest {
            name: "Ada".into(),
            phone: "555-0100".into(),
            email: "ada@example.com".into(),
            token: "abc".into(),
            latitude: None,
            longitude: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = CheckinRequest {
            email: "not-an-email".into(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = CheckinRequest {
            name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_generate_token_request_range() {
        let ok = GenerateTokenRequest {
            validity_seconds: Some(60),
            permanent: false,
        };
        assert!(ok.validate().is_ok());

        let zero = GenerateTokenRequest {
            validity_seconds: Some(0),
            permanent: false,
        };
        assert!(zero.validate().is_err());
    }
}
