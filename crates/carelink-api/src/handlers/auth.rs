//! Auth handlers — register, login, me.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use carelink_service::user::RegisterUser;

use crate::dto::request::{self, LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    request::validate(&req)?;

    let user = state
        .user_service
        .register(RegisterUser {
            name: req.name,
            email: req.email,
            phone: req.phone,
            password: req.password,
        })
        .await?;

    let tokens = state
        .jwt_encoder
        .generate_token_pair(user.id, user.role, &user.name, &user.email)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AuthResponse {
            user: user.into(),
            tokens,
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    request::validate(&req)?;

    let user = state
        .user_service
        .verify_credentials(&req.email, &req.password)
        .await?;

    let tokens = state
        .jwt_encoder
        .generate_token_pair(user.id, user.role, &user.name, &user.email)?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        user: user.into(),
        tokens,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
