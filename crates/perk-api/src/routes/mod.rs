//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, checkin, health, qr};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(qr_routes())
        .merge(loyalty_routes())
        .merge(admin_routes())
}

/// QR token routes
fn qr_routes() -> Router<AppState> {
    Router::new()
        .route("/qr/generate", post(qr::generate_token))
        .route("/qr/validate", post(qr::validate_token))
}

/// Loyalty routes
fn loyalty_routes() -> Router<AppState> {
    Router::new()
        .route("/loyalty/checkin", post(checkin::check_in))
        .route("/loyalty/register", post(checkin::register))
}

/// Admin dashboard routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/customers", get(admin::list_customers))
        .route(
            "/admin/customers/:customer_id/visits",
            get(admin::customer_visits),
        )
        .route("/admin/visits", get(admin::list_visits))
        .route("/admin/rewards", get(admin::list_rewards))
        .route("/admin/notifications", get(admin::list_notifications))
}
