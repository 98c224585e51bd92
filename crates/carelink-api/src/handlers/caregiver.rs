//! Caregiver directory handlers.

use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/caregivers
pub async fn list_caregivers(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let caregivers = state.user_service.find_verified_caregivers().await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": caregivers,
    })))
}
