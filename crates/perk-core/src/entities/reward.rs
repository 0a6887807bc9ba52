//! Reward entity - created exactly once per threshold crossing

use chrono::{DateTime, Utc};

/// Reward type for the current single-reward design
pub const FREE_COFFEE: &str = "free_coffee";

/// Reward entity, append-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub id: i64,
    pub customer_id: i64,
    pub reward_type: String,
    pub points_used: i32,
    pub redeemed_at: DateTime<Utc>,
}
