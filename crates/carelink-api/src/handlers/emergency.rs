//! Emergency request handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use carelink_service::emergency::CreateEmergencyRequest;

use crate::dto::request;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/emergency
pub async fn create_emergency_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<request::CreateEmergencyRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    request::validate(&req)?;

    let booking = state
        .emergency_service
        .create_emergency_request(
            &auth,
            CreateEmergencyRequest {
                caregiver_id: req.caregiver_id,
                address: req.address,
                notes: req.notes,
                phone: req.phone,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": booking,
            "message": "Emergency request created and notifications sent",
        })),
    ))
}

/// GET /api/emergency
pub async fn list_emergency_requests(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let page = state
        .emergency_service
        .list_emergency_requests(&params.to_page_request())
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": page.items,
        "pagination": page.pagination,
    })))
}
