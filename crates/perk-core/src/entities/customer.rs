//! Customer entity - a loyalty program member keyed by phone number

use chrono::{DateTime, Utc};

/// Customer entity
///
/// Identity is keyed solely on `phone`; `name` and `email` are whatever the
/// customer last entered at registration and are not part of the dedup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
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

impl Customer {
    /// Create a fresh customer with zeroed counters
    pub fn new(id: i64, name: String, phone: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            phone,
            email,
            total_visits: 0,
            current_points: 0,
            total_rewards: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply one visit's points to the running balance, returning whether a
    /// reward was earned.
    ///
    /// Points roll over past the threshold rather than clamping to zero, so
    /// a settlement crediting more than one point keeps fractional progress
    /// toward the next reward. After settlement `current_points` is always
    /// in `[0, threshold)`.
    pub fn settle_visit(&mut self, points: i32, threshold: i32) -> bool {
        let new_points = self.current_points + points;
        self.total_visits += 1;
        self.updated_at = Utc::now();

        if new_points >= threshold {
            self.current_points = new_points - threshold;
            self.total_rewards += 1;
            true
        } else {
            self.current_points = new_points;
            false
        }
    }

    /// Points still needed before the next reward
    pub fn points_to_next_reward(&self, threshold: i32) -> i32 {
        threshold - self.current_points
    }
}
