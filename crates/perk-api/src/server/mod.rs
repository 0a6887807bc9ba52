//! Server setup and initialization
//!
//! Provides the main application builder, dependency wiring, the background
//! token sweeper, and the server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use perk_common::{AppConfig, AppError};
use perk_core::geo::{Coordinate, Geofence};
use perk_core::traits::CheckinPolicy;
use perk_db::{
    create_pool, run_migrations, PgCustomerRepository, PgLedgerRepository, PgTokenRepository,
};
use perk_service::{
    NotificationDispatcher, NotificationLog, ServiceContextBuilder, TokenService,
};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get the basic stack only, so probes are never shed by the
/// rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = perk_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Apply pending migrations
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    // Build the store geofence from configuration
    let center = Coordinate::new(config.geofence.store_latitude, config.geofence.store_longitude)
        .map_err(|e| AppError::Config(e.to_string()))?;
    let geofence = Geofence::new(center, config.geofence.radius_meters)
        .map_err(|e| AppError::Config(e.to_string()))?;

    let checkin_policy = CheckinPolicy {
        points_per_visit: config.loyalty.points_per_visit,
        reward_threshold: config.loyalty.reward_threshold,
        cooldown: Duration::from_secs(config.loyalty.cooldown_seconds.max(0) as u64),
    };

    // Notification chain + shared log
    let notification_log = NotificationLog::new();
    let dispatcher = Arc::new(NotificationDispatcher::from_config(
        &config.notify,
        notification_log.clone(),
    ));

    // Create repositories
    let token_repo = Arc::new(PgTokenRepository::new(pool.clone()));
    let customer_repo = Arc::new(PgCustomerRepository::new(pool.clone()));
    let ledger_repo = Arc::new(PgLedgerRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .token_repo(token_repo)
        .customer_repo(customer_repo)
        .ledger_repo(ledger_repo)
        .geofence(geofence)
        .geofence_enforced(config.geofence.enforced)
        .checkin_policy(checkin_policy)
        .default_token_validity_seconds(config.qr.default_validity_seconds)
        .dispatcher(dispatcher)
        .notification_log(notification_log)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Spawn the periodic expired-token sweeper
///
/// Housekeeping only: validation and consumption re-check expiry
/// themselves, so a missed sweep never admits a stale token.
pub fn spawn_token_sweeper(state: &AppState) {
    let service = TokenService::new(state.service_context().clone());
    let interval = Duration::from_secs(state.config().qr.sweep_interval_seconds);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so startup stays quiet.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match service.sweep_expired().await {
                Ok(removed) => {
                    if removed > 0 {
                        info!(removed, "expired token sweep complete");
                    }
                }
                Err(e) => error!(error = %e, "expired token sweep failed"),
            }
        }
    });
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address: {e}")))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Start background housekeeping
    spawn_token_sweeper(&state);

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
