//! Reward database model

use chrono::{DateTime, Utc};
use perk_core::entities::Reward;
use sqlx::FromRow;

/// Database model for the loyalty_rewards table
#[derive(Debug, Clone, FromRow)]
pub struct RewardModel {
    pub id: i64,
    pub customer_id: i64,
    pub reward_type: String,
    pub points_used: i32,
    pub redeemed_at: DateTime<Utc>,
}

impl From<RewardModel> for Reward {
    fn from(model: RewardModel) -> Self {
        Reward {
            id: model.id,
            customer_id: model.customer_id,
            reward_type: model.reward_type,
            points_used: model.points_used,
            redeemed_at: model.redeemed_at,
        }
    }
}
