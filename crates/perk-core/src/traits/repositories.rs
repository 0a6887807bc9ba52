//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Exactly one implementation conforms per
//! deployment target; consumers receive it by injection, never through an
//! ambient singleton.

use std::time::Duration;

use async_trait::async_trait;

use crate::entities::{Customer, QrToken, Reward, Visit};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Token Repository
// ============================================================================

/// Validation outcome for a presented token string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No matching record exists
    NotFound,
    /// `expires_at` has passed (checked before the used flag)
    Expired,
    /// Already consumed exactly once before
    AlreadyUsed,
    /// Redeemable right now
    Valid {
        remaining_seconds: i64,
        permanent: bool,
    },
}

impl TokenStatus {
    /// Convert a non-valid status into its rejection error
    pub fn rejection(&self) -> Option<DomainError> {
        match self {
            Self::NotFound => Some(DomainError::TokenNotFound),
            Self::Expired => Some(DomainError::TokenExpired),
            Self::AlreadyUsed => Some(DomainError::TokenAlreadyUsed),
            Self::Valid { .. } => None,
        }
    }
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a freshly issued token
    async fn create(&self, token: &QrToken) -> RepoResult<()>;

    /// Find a token record by its code
    async fn find(&self, token: &str) -> RepoResult<Option<QrToken>>;

    /// Classify a presented token without consuming it
    async fn validate(&self, token: &str) -> RepoResult<TokenStatus>;

    /// Delete all tokens whose `expires_at` has passed, regardless of
    /// `used` state. Housekeeping only; `validate` re-checks expiry itself.
    async fn delete_expired(&self) -> RepoResult<u64>;
}

// ============================================================================
// Customer Repository
// ============================================================================

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by surrogate id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Customer>>;

    /// Find a customer by phone (the natural key)
    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Customer>>;

    /// Create a customer with zeroed counters; fails with `PhoneConflict`
    /// if the phone is already registered
    async fn create(&self, name: &str, phone: &str, email: &str) -> RepoResult<Customer>;

    /// Look up by phone, creating on first sight. Identity is keyed solely
    /// on phone: an existing record wins and its name/email are kept.
    async fn find_or_create(&self, name: &str, phone: &str, email: &str) -> RepoResult<Customer>;

    /// List customers for the admin dashboard, newest first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<Customer>>;
}

// ============================================================================
// Ledger Repository
// ============================================================================

/// Policy constants governing one settlement, built from configuration
#[derive(Debug, Clone, Copy)]
pub struct CheckinPolicy {
    pub points_per_visit: i32,
    pub reward_threshold: i32,
    pub cooldown: Duration,
}

/// Result of a committed check-in settlement
#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    pub customer: Customer,
    pub visit: Visit,
    pub reward: Option<Reward>,
}

impl SettlementOutcome {
    pub fn earned_reward(&self) -> bool {
        self.reward.is_some()
    }
}

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// The serialized check-in critical section, executed as one
    /// transaction:
    ///
    /// 1. conditionally consume the token (`used = FALSE AND expires_at >
    ///    now`, affected-row check) so concurrent requests with the same
    ///    token cannot both proceed;
    /// 2. lock the customer row;
    /// 3. reject with `TooSoon` if the newest visit falls inside the
    ///    cooldown window;
    /// 4. append the visit row, settle points with rollover, and append a
    ///    reward row when the threshold was crossed.
    ///
    /// Any failure rolls the whole transaction back, leaving the token
    /// unconsumed and the ledger untouched.
    async fn settle_checkin(
        &self,
        token: &str,
        customer_id: i64,
        policy: CheckinPolicy,
    ) -> RepoResult<SettlementOutcome>;

    /// List visits, newest first (admin dashboard)
    async fn list_visits(&self, limit: i64, offset: i64) -> RepoResult<Vec<Visit>>;

    /// List all visits for one customer, newest first
    async fn visits_for_customer(&self, customer_id: i64) -> RepoResult<Vec<Visit>>;

    /// List rewards, newest first (admin dashboard)
    async fn list_rewards(&self, limit: i64, offset: i64) -> RepoResult<Vec<Reward>>;
}
