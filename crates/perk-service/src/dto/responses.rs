//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use perk_core::entities::{Customer, Reward, Visit};
use serde::Serialize;

// ============================================================================
// QR Token Responses
// ============================================================================

/// Freshly issued token
#[derive(Debug, Clone, Serialize)]
pub struct TokenIssuedResponse {
    pub token: String,
    pub permanent: bool,
    /// Absent for permanent kiosk codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Validity window in seconds; absent for permanent codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_for: Option<i64>,
}

/// Validation answer for a presented token
///
/// Invalid tokens still answer HTTP 200 with `valid: false` + reason so the
/// kiosk page can prompt a re-scan without error handling gymnastics.
#[derive(Debug, Clone, Serialize)]
pub struct TokenValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent: Option<bool>,
}

// ============================================================================
// Loyalty Responses
// ============================================================================

/// Customer snapshot returned from check-in and admin endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub total_visits: i32,
    pub current_points: i32,
    pub total_rewards: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            phone: customer.phone,
            email: customer.email,
            total_visits: customer.total_visits,
            current_points: customer.current_points,
            total_rewards: customer.total_rewards,
            created_at: customer.created_at,
        }
    }
}

/// Successful check-in result
#[derive(Debug, Clone, Serialize)]
pub struct CheckinResponse {
    pub message: String,
    pub customer: CustomerResponse,
    pub earned_reward: bool,
    pub points_to_next_reward: i32,
}

/// Visit row for the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct VisitResponse {
    pub id: i64,
    pub customer_id: i64,
    pub visit_date: DateTime<Utc>,
    pub points_earned: i32,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            customer_id: visit.customer_id,
            visit_date: visit.visit_date,
            points_earned: visit.points_earned,
        }
    }
}

/// Reward row for the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct RewardResponse {
    pub id: i64,
    pub customer_id: i64,
    pub reward_type: String,
    pub points_used: i32,
    pub redeemed_at: DateTime<Utc>,
}

impl From<Reward> for RewardResponse {
    fn from(reward: Reward) -> Self {
        Self {
            id: reward.id,
            customer_id: reward.customer_id,
            reward_type: reward.reward_type,
            points_used: reward.points_used,
            redeemed_at: reward.redeemed_at,
        }
    }
}

/// Notification attempt record for the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecordResponse {
    pub at: DateTime<Utc>,
    pub channel: String,
    pub recipient: String,
    pub message: String,
    pub success: bool,
}

impl From<crate::services::NotificationRecord> for NotificationRecordResponse {
    fn from(record: crate::services::NotificationRecord) -> Self {
        Self {
            at: record.at,
            channel: record.channel,
            recipient: record.recipient,
            message: record.message,
            success: record.success,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            database,
        }
    }
}
