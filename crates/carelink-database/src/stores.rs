//! Store traits implemented by the Postgres repositories.
//!
//! Services depend on these traits (`Arc<dyn Store>`) rather than on the
//! concrete repositories, so tests can substitute in-memory fakes and no
//! service is coupled to sqlx.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::booking::{Booking, BookingStatus, NewBooking};
use carelink_entity::caregiver::{CaregiverProfile, CaregiverWithUser};
use carelink_entity::notification::{NewNotification, Notification};
use carelink_entity::user::{CreateUser, UpdateProfile, User};

/// User account persistence and directory lookups.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find users by a set of IDs. Missing IDs are silently absent from
    /// the result.
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>>;

    /// List all active admin users.
    async fn find_active_admins(&self) -> AppResult<Vec<User>>;

    /// Create a new user.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Update a user's profile fields.
    async fn update_profile(&self, data: &UpdateProfile) -> AppResult<User>;
}

/// Caregiver profile persistence and directory lookups.
#[async_trait]
pub trait CaregiverStore: Send + Sync + 'static {
    /// Find a caregiver profile by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CaregiverProfile>>;

    /// List all verified caregiver profiles joined with their user
    /// accounts (name, email, phone).
    async fn find_verified(&self) -> AppResult<Vec<CaregiverWithUser>>;
}

/// Booking persistence.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Insert a new booking.
    async fn create(&self, data: &NewBooking) -> AppResult<Booking>;

    /// Find a booking by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// List bookings owned by a customer, newest first.
    async fn find_for_customer(
        &self,
        customer_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>>;

    /// List emergency bookings still awaiting care (status requested or
    /// confirmed), newest first.
    async fn find_emergencies(&self, page: &PageRequest) -> AppResult<PageResponse<Booking>>;

    /// Count non-terminal bookings for a caregiver whose start time falls
    /// inside the given window.
    async fn count_conflicts(
        &self,
        caregiver_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> AppResult<i64>;

    /// Update a booking's status. Fails with NotFound if the booking does
    /// not exist.
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking>;
}

/// Notification persistence. Every operation that touches an existing row
/// is scoped to the owning user.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Insert a new unread notification.
    async fn create(&self, data: &NewNotification) -> AppResult<Notification>;

    /// List notifications for a user, newest first, optionally restricted
    /// to unread rows.
    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
        unread_only: bool,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count unread notifications for a user, regardless of any listing
    /// filter or pagination window.
    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64>;

    /// Mark a notification as read. Fails with NotFound if no row matches
    /// both the ID and the owning user.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Notification>;

    /// Mark all unread notifications for a user as read. Idempotent.
    /// Returns the number of rows flipped.
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    /// Delete a notification. Fails with NotFound if no row matches both
    /// the ID and the owning user.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<()>;
}
