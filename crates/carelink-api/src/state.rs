//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use carelink_auth::{JwtDecoder, JwtEncoder};
use carelink_core::config::AppConfig;
use carelink_service::booking::BookingService;
use carelink_service::emergency::EmergencyService;
use carelink_service::notification::NotificationService;
use carelink_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool (health checks)
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// User account and directory service
    pub user_service: Arc<UserService>,
    /// Booking service
    pub booking_service: Arc<BookingService>,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
    /// Emergency request orchestrator
    pub emergency_service: Arc<EmergencyService>,
}
