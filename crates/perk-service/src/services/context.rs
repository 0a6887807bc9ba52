//! Service context - dependency container for services
//!
//! Holds the repositories, geofence policy, and notification machinery
//! needed by the service layer.

use std::sync::Arc;

use perk_core::geo::Geofence;
use perk_core::traits::{CheckinPolicy, CustomerRepository, LedgerRepository, TokenRepository};
use perk_db::PgPool;

use super::notify::{NotificationDispatcher, NotificationLog};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The store geofence and its enforcement flag
/// - The check-in accrual policy
/// - The notification dispatcher and its in-memory log
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    token_repo: Arc<dyn TokenRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    ledger_repo: Arc<dyn LedgerRepository>,

    // Policies
    geofence: Geofence,
    geofence_enforced: bool,
    checkin_policy: CheckinPolicy,
    default_token_validity_seconds: i64,

    // Notifications
    dispatcher: Arc<NotificationDispatcher>,
    notification_log: NotificationLog,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        token_repo: Arc<dyn TokenRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        ledger_repo: Arc<dyn LedgerRepository>,
        geofence: Geofence,
        geofence_enforced: bool,
        checkin_policy: CheckinPolicy,
        default_token_validity_seconds: i64,
        dispatcher: Arc<NotificationDispatcher>,
        notification_log: NotificationLog,
    ) -> Self {
        Self {
            pool,
            token_repo,
            customer_repo,
            ledger_repo,
            geofence,
            geofence_enforced,
            checkin_policy,
            default_token_validity_seconds,
            dispatcher,
            notification_log,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the token repository
    pub fn token_repo(&self) -> &dyn TokenRepository {
        self.token_repo.as_ref()
    }

    /// Get the customer repository
    pub fn customer_repo(&self) -> &dyn CustomerRepository {
        self.customer_repo.as_ref()
    }

    /// Get the ledger repository
    pub fn ledger_repo(&self) -> &dyn LedgerRepository {
        self.ledger_repo.as_ref()
    }

    // === Policies ===

    /// Get the store geofence
    pub fn geofence(&self) -> Geofence {
        self.geofence
    }

    /// Whether check-ins without coordinates are rejected
    pub fn geofence_enforced(&self) -> bool {
        self.geofence_enforced
    }

    /// Get the check-in accrual policy
    pub fn checkin_policy(&self) -> CheckinPolicy {
        self.checkin_policy
    }

    /// Default token validity when the caller does not specify one
    pub fn default_token_validity_seconds(&self) -> i64 {
        self.default_token_validity_seconds
    }

    // === Notifications ===

    /// Get the notification dispatcher
    pub fn dispatcher(&self) -> &NotificationDispatcher {
        self.dispatcher.as_ref()
    }

    /// Get a clone of the dispatcher handle, for spawned tasks
    pub fn dispatcher_handle(&self) -> Arc<NotificationDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Get the in-memory notification log
    pub fn notification_log(&self) -> &NotificationLog {
        &self.notification_log
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("geofence", &self.geofence)
            .field("geofence_enforced", &self.geofence_enforced)
            .field("checkin_policy", &self.checkin_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    token_repo: Option<Arc<dyn TokenRepository>>,
    customer_repo: Option<Arc<dyn CustomerRepository>>,
    ledger_repo: Option<Arc<dyn LedgerRepository>>,
    geofence: Option<Geofence>,
    geofence_enforced: bool,
    checkin_policy: Option<CheckinPolicy>,
    default_token_validity_seconds: Option<i64>,
    dispatcher: Option<Arc<NotificationDispatcher>>,
    notification_log: Option<NotificationLog>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            token_repo: None,
            customer_repo: None,
            ledger_repo: None,
            geofence: None,
            geofence_enforced: true,
            checkin_policy: None,
            default_token_validity_seconds: None,
            dispatcher: None,
            notification_log: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn token_repo(mut self, repo: Arc<dyn TokenRepository>) -> Self {
        self.token_repo = Some(repo);
        self
    }

    pub fn customer_repo(mut self, repo: Arc<dyn CustomerRepository>) -> Self {
        self.customer_repo = Some(repo);
        self
    }

    pub fn ledger_repo(mut self, repo: Arc<dyn LedgerRepository>) -> Self {
        self.ledger_repo = Some(repo);
        self
    }

    pub fn geofence(mut self, fence: Geofence) -> Self {
        self.geofence = Some(fence);
        self
    }

    pub fn geofence_enforced(mut self, enforced: bool) -> Self {
        self.geofence_enforced = enforced;
        self
    }

    pub fn checkin_policy(mut self, policy: CheckinPolicy) -> Self {
        self.checkin_policy = Some(policy);
        self
    }

    pub fn default_token_validity_seconds(mut self, seconds: i64) -> Self {
        self.default_token_validity_seconds = Some(seconds);
        self
    }

    pub fn dispatcher(mut self, dispatcher: Arc<NotificationDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn notification_log(mut self, log: NotificationLog) -> Self {
        self.notification_log = Some(log);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        let notification_log = self.notification_log.unwrap_or_default();
        let dispatcher = match self.dispatcher {
            Some(d) => d,
            None => Arc::new(NotificationDispatcher::new(
                Vec::new(),
                notification_log.clone(),
            )),
        };

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.token_repo
                .ok_or_else(|| ServiceError::validation("token_repo is required"))?,
            self.customer_repo
                .ok_or_else(|| ServiceError::validation("customer_repo is required"))?,
            self.ledger_repo
                .ok_or_else(|| ServiceError::validation("ledger_repo is required"))?,
            self.geofence
                .ok_or_else(|| ServiceError::validation("geofence is required"))?,
            self.geofence_enforced,
            self.checkin_policy
                .ok_or_else(|| ServiceError::validation("checkin_policy is required"))?,
            self.default_token_validity_seconds
                .ok_or_else(|| ServiceError::validation("default_token_validity_seconds is required"))?,
            dispatcher,
            notification_log,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
