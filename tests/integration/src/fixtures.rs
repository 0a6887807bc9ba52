//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Phone numbers are the
//! customer identity key and the database persists across test runs, so
//! uniqueness combines the process id with a per-process counter.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Store coordinate matching the test server geofence
pub const STORE_LATITUDE: f64 = 40.7709;
pub const STORE_LONGITUDE: f64 = -73.9207;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    u64::from(std::process::id()) * 100_000 + counter
}

/// Generate a unique phone number
pub fn unique_phone() -> String {
    format!("555{:012}", unique_suffix())
}

// ============================================================================
// Requests
// ============================================================================

/// Token issuance request
#[derive(Debug, Serialize)]
pub struct GenerateTokenRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_seconds: Option<i64>,
    pub permanent: bool,
}

impl GenerateTokenRequest {
    pub fn short_lived() -> Self {
        Self {
            validity_seconds: Some(60),
            permanent: false,
        }
    }

    pub fn permanent() -> Self {
        Self {
            validity_seconds: None,
            permanent: true,
        }
    }
}

/// Token validation request
#[derive(Debug, Serialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

/// Check-in request
#[derive(Debug, Clone, Serialize)]
pub struct CheckinRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl CheckinRequest {
    /// A fresh customer checking in at the store coordinate
    pub fn unique_at_store(token: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Customer {suffix}"),
            phone: unique_phone(),
            email: format!("customer{suffix}@example.com"),
            token: token.to_string(),
            latitude: Some(STORE_LATITUDE),
            longitude: Some(STORE_LONGITUDE),
        }
    }

    /// Same customer, new token
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            token: token.to_string(),
            ..self.clone()
        }
    }
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Registered Customer {suffix}"),
            phone: unique_phone(),
            email: format!("registered{suffix}@example.com"),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Issued token response
#[derive(Debug, Deserialize)]
pub struct TokenIssuedResponse {
    pub token: String,
    pub permanent: bool,
    pub expires_at: Option<String>,
    pub valid_for: Option<i64>,
}

/// Token validation response
#[derive(Debug, Deserialize)]
pub struct TokenValidationResponse {
    pub valid: bool,
    pub reason: Option<String>,
    pub remaining_time: Option<i64>,
    pub permanent: Option<bool>,
}

/// Customer snapshot
#[derive(Debug, Deserialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub total_visits: i32,
    pub current_points: i32,
    pub total_rewards: i32,
    pub created_at: String,
}

/// Check-in response
#[derive(Debug, Deserialize)]
pub struct CheckinResponse {
    pub message: String,
    pub customer: CustomerResponse,
    pub earned_reward: bool,
    pub points_to_next_reward: i32,
}

/// Visit row
#[derive(Debug, Deserialize)]
pub struct VisitResponse {
    pub id: i64,
    pub customer_id: i64,
    pub visit_date: String,
    pub points_earned: i32,
}

/// Reward row
#[derive(Debug, Deserialize)]
pub struct RewardResponse {
    pub id: i64,
    pub customer_id: i64,
    pub reward_type: String,
    pub points_used: i32,
    pub redeemed_at: String,
}

/// Notification attempt record
#[derive(Debug, Deserialize)]
pub struct NotificationRecordResponse {
    pub at: String,
    pub channel: String,
    pub recipient: String,
    pub message: String,
    pub success: bool,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
