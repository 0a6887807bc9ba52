//! Customer database model

use chrono::{DateTime, Utc};
use perk_core::entities::Customer;
use sqlx::FromRow;

/// Database model for the loyalty_customers table
#[derive(Debug, Clone, FromRow)]
pub struct CustomerModel {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub total_visits: i32,
    pub current_points: i32,
    pub total_rewards: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerModel> for Customer {
    fn from(model: CustomerModel) -> Self {
        Customer {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            total_visits: model.total_visits,
            current_points: model.current_points,
            total_rewards: model.total_rewards,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
