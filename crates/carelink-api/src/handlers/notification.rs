//! Notification handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let list = state
        .notification_service
        .list(&auth, &params.to_page_request(), params.unread_only)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": list.page.items,
        "pagination": list.page.pagination,
        "unreadCount": list.unread_count,
    })))
}

/// PATCH /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let notification = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": notification,
    })))
}

/// PATCH /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "All notifications marked as read",
    })))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.notification_service.delete(&auth, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Notification deleted",
    })))
}
