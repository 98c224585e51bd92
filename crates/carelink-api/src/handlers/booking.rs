//! Booking handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use carelink_entity::booking::BookingStatus;
use carelink_service::booking::CreateBooking;

use crate::dto::request::{self, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    request::validate(&req)?;

    let booking = state
        .booking_service
        .create_booking(CreateBooking {
            customer_id: auth.user_id,
            caregiver_id: req.caregiver_id,
            start_time: req.start_time,
            address: req.address,
            notes: req.notes,
            is_emergency: false,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": booking,
            "message": "Booking created",
        })),
    ))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let page = state
        .booking_service
        .list_for_customer(&auth, &params.to_page_request())
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": page.items,
        "pagination": page.pagination,
    })))
}

/// PATCH /api/bookings/{id}/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let status: BookingStatus = req.status.parse().map_err(ApiError)?;
    let booking = state
        .booking_service
        .update_status(&auth, id, status)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": booking,
    })))
}
