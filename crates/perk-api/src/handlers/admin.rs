//! Admin dashboard handlers
//!
//! Read-only endpoints behind the `x-admin-key` header.

use axum::{
    extract::{Path, State},
    Json,
};
use perk_service::{
    CustomerResponse, CustomerService, NotificationRecordResponse, RewardResponse, VisitResponse,
};

use crate::extractors::{AdminKey, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// List customers, newest first
///
/// GET /api/admin/customers
pub async fn list_customers(
    State(state): State<AppState>,
    _admin: AdminKey,
    pagination: Pagination,
) -> ApiResult<Json<Vec<CustomerResponse>>> {
    let service = CustomerService::new(state.service_context().clone());
    let customers = service
        .list_customers(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(customers))
}

/// Visit history for one customer
///
/// GET /api/admin/customers/:customer_id/visits
pub async fn customer_visits(
    State(state): State<AppState>,
    _admin: AdminKey,
    Path(customer_id): Path<i64>,
) -> ApiResult<Json<Vec<VisitResponse>>> {
    let service = CustomerService::new(state.service_context().clone());
    let visits = service.customer_visits(customer_id).await?;
    Ok(Json(visits))
}

/// List visits across all customers, newest first
///
/// GET /api/admin/visits
pub async fn list_visits(
    State(state): State<AppState>,
    _admin: AdminKey,
    pagination: Pagination,
) -> ApiResult<Json<Vec<VisitResponse>>> {
    let service = CustomerService::new(state.service_context().clone());
    let visits = service
        .list_visits(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(visits))
}

/// List rewards, newest first
///
/// GET /api/admin/rewards
pub async fn list_rewards(
    State(state): State<AppState>,
    _admin: AdminKey,
    pagination: Pagination,
) -> ApiResult<Json<Vec<RewardResponse>>> {
    let service = CustomerService::new(state.service_context().clone());
    let rewards = service
        .list_rewards(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(rewards))
}

/// Dump the in-memory notification dispatch log, oldest first
///
/// GET /api/admin/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    _admin: AdminKey,
) -> ApiResult<Json<Vec<NotificationRecordResponse>>> {
    let records = state
        .service_context()
        .notification_log()
        .snapshot()
        .into_iter()
        .map(NotificationRecordResponse::from)
        .collect();
    Ok(Json(records))
}
