//! Visit database model

use chrono::{DateTime, Utc};
use perk_core::entities::Visit;
use sqlx::FromRow;

/// Database model for the loyalty_visits table
#[derive(Debug, Clone, FromRow)]
pub struct VisitModel {
    pub id: i64,
    pub customer_id: i64,
    pub visit_date: DateTime<Utc>,
    pub points_earned: i32,
}

impl From<VisitModel> for Visit {
    fn from(model: VisitModel) -> Self {
        Visit {
            id: model.id,
            customer_id: model.customer_id,
            visit_date: model.visit_date,
            points_earned: model.points_earned,
        }
    }
}
