//! Visit entity - one append-only row per successful check-in

use chrono::{DateTime, Utc};

/// Visit entity, never mutated or deleted after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub customer_id: i64,
    pub visit_date: DateTime<Utc>,
    pub points_earned: i32,
}
