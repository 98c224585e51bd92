//! CareLink Server — Care Booking & Emergency Alert Platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use carelink_core::config::AppConfig;
use carelink_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("CARELINK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CareLink v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = carelink_database::DatabasePool::connect(&config.database).await?;
    carelink_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(carelink_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let caregiver_repo = Arc::new(carelink_database::repositories::CaregiverRepository::new(
        db_pool.clone(),
    ));
    let booking_repo = Arc::new(carelink_database::repositories::BookingRepository::new(
        db_pool.clone(),
    ));
    let notification_repo = Arc::new(
        carelink_database::repositories::NotificationRepository::new(db_pool.clone()),
    );

    // ── Step 3: Auth + email transports ──────────────────────────
    let jwt_encoder = Arc::new(carelink_auth::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(carelink_auth::JwtDecoder::new(&config.auth));
    let password_hasher = carelink_auth::PasswordHasher::new();
    let mailer = carelink_email::build_mailer(&config.email)?;

    // ── Step 4: Services ─────────────────────────────────────────
    let user_service = Arc::new(carelink_service::user::UserService::new(
        user_repo.clone(),
        caregiver_repo.clone(),
        password_hasher,
        &config.auth,
    ));
    let booking_service = Arc::new(carelink_service::booking::BookingService::new(
        booking_repo.clone(),
        caregiver_repo.clone(),
    ));
    let notification_service = Arc::new(carelink_service::notification::NotificationService::new(
        notification_repo.clone(),
    ));
    let dispatcher = Arc::new(carelink_service::notification::NotificationDispatcher::new(
        notification_repo.clone(),
        user_repo.clone(),
        mailer,
        config.server.frontend_url.clone(),
        Duration::from_secs(config.email.send_timeout_seconds),
    ));
    let emergency_service = Arc::new(carelink_service::emergency::EmergencyService::new(
        user_repo.clone(),
        booking_repo.clone(),
        booking_service.clone(),
        user_service.clone(),
        dispatcher,
    ));

    tracing::info!("Services initialized");

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app_state = carelink_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        user_service,
        booking_service,
        notification_service,
        emergency_service,
    };

    let app = carelink_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CareLink server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("CareLink server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
