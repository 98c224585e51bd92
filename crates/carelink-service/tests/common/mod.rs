//! Shared test doubles: in-memory stores and fake mailers.
//!
//! Every store trait gets a `Mutex<Vec<_>>`-backed implementation with
//! optional failure injection, so service behavior can be exercised
//! without a database or SMTP relay.

// Each test binary compiles its own copy of this module and uses a
// different subset of it.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use uuid::Uuid;

use carelink_auth::PasswordHasher;
use carelink_core::config::auth::AuthConfig;
use carelink_core::error::AppError;
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::stores::{BookingStore, CaregiverStore, NotificationStore, UserStore};
use carelink_email::{EmailMessage, Mailer};
use carelink_entity::booking::{Booking, BookingStatus, NewBooking};
use carelink_entity::caregiver::{CaregiverProfile, CaregiverWithUser};
use carelink_entity::notification::{
    NewNotification, Notification, NotificationStatus,
};
use carelink_entity::user::{CreateUser, UpdateProfile, User, UserRole};

use carelink_service::booking::BookingService;
use carelink_service::emergency::EmergencyService;
use carelink_service::notification::{NotificationDispatcher, NotificationService};
use carelink_service::user::UserService;
use carelink_service::RequestContext;

// ---------------------------------------------------------------------------
// Entity builders
// ---------------------------------------------------------------------------

/// Build a user with the given role.
pub fn make_user(name: &str, email: &str, role: UserRole, is_active: bool) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        phone: Some("555-0000".to_string()),
        password_hash: "unused".to_string(),
        role,
        is_active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Build a caregiver profile linked to the given user.
pub fn make_profile(user_id: Uuid, verified: bool, hourly_rate_cents: i64) -> CaregiverProfile {
    CaregiverProfile {
        id: Uuid::new_v4(),
        user_id,
        verified,
        bio: None,
        hourly_rate_cents,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Request context for the given user.
pub fn ctx_for(user: &User) -> RequestContext {
    RequestContext::new(user.id, user.role, user.name.clone(), user.email.clone())
}

// ---------------------------------------------------------------------------
// In-memory user store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserStore {
    pub users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(users),
        })
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        let wanted: HashSet<Uuid> = ids.iter().copied().collect();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| wanted.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_active_admins(&self) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == UserRole::Admin && u.is_active)
            .cloned()
            .collect())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::conflict(format!(
                "Email '{}' already in use",
                data.email
            )));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(&self, data: &UpdateProfile) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == data.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))?;
        if let Some(name) = &data.name {
            user.name = name.clone();
        }
        if let Some(phone) = &data.phone {
            user.phone = Some(phone.clone());
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

// ---------------------------------------------------------------------------
// In-memory caregiver store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryCaregiverStore {
    pub profiles: Mutex<Vec<CaregiverWithUser>>,
    /// When true, `find_verified` fails, simulating a directory outage.
    pub fail_directory: Mutex<bool>,
}

impl InMemoryCaregiverStore {
    pub fn with_profiles(profiles: Vec<CaregiverWithUser>) -> Arc<Self> {
        Arc::new(Self {
            profiles: Mutex::new(profiles),
            fail_directory: Mutex::new(false),
        })
    }

    pub fn set_fail_directory(&self, fail: bool) {
        *self.fail_directory.lock().unwrap() = fail;
    }
}

#[async_trait]
impl CaregiverStore for InMemoryCaregiverStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CaregiverProfile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.profile.id == id)
            .map(|c| c.profile.clone()))
    }

    async fn find_verified(&self) -> AppResult<Vec<CaregiverWithUser>> {
        if *self.fail_directory.lock().unwrap() {
            return Err(AppError::database("caregiver directory unavailable"));
        }
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.profile.verified)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// In-memory booking store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryBookingStore {
    pub bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingStore {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create(&self, data: &NewBooking) -> AppResult<Booking> {
        let booking = Booking {
            id: Uuid::new_v4(),
            customer_id: data.customer_id,
            caregiver_id: data.caregiver_id,
            start_time: data.start_time,
            address: data.address.clone(),
            notes: data.notes.clone(),
            price_cents: data.price_cents,
            status: data.status,
            is_emergency: data.is_emergency,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn find_for_customer(
        &self,
        customer_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let matching: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }

    async fn find_emergencies(&self, page: &PageRequest) -> AppResult<PageResponse<Booking>> {
        let matching: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|b| {
                b.is_emergency
                    && matches!(
                        b.status,
                        BookingStatus::Requested | BookingStatus::Confirmed
                    )
            })
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }

    async fn count_conflicts(
        &self,
        caregiver_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> AppResult<i64> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| {
                b.caregiver_id == Some(caregiver_id)
                    && !b.status.is_terminal()
                    && b.start_time >= window_start
                    && b.start_time < window_end
            })
            .count() as i64)
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }
}

// ---------------------------------------------------------------------------
// In-memory notification store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryNotificationStore {
    pub notifications: Mutex<Vec<Notification>>,
    /// Creates for these recipients fail, simulating per-row write errors.
    pub fail_creates_for: Mutex<HashSet<Uuid>>,
    seq: Mutex<i64>,
}

impl InMemoryNotificationStore {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn fail_creates_for(&self, user_id: Uuid) {
        self.fail_creates_for.lock().unwrap().insert(user_id);
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn create(&self, data: &NewNotification) -> AppResult<Notification> {
        if self.fail_creates_for.lock().unwrap().contains(&data.user_id) {
            return Err(AppError::database("notification insert failed"));
        }
        // Stagger created_at so newest-first ordering is unambiguous.
        let mut seq = self.seq.lock().unwrap();
        *seq += 1;
        let created_at = Utc::now() + ChronoDuration::milliseconds(*seq);
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            kind: data.kind,
            title: data.title.clone(),
            message: data.message.clone(),
            status: NotificationStatus::Unread,
            metadata: data.metadata.clone(),
            created_at,
            updated_at: created_at,
        };
        self.notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(notification)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
        unread_only: bool,
    ) -> AppResult<PageResponse<Notification>> {
        let mut matching: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .filter(|n| !unread_only || n.status == NotificationStatus::Unread)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matching, page))
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && n.status == NotificationStatus::Unread)
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Notification> {
        let mut notifications = self.notifications.lock().unwrap();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Notification not found"))?;
        notification.status = NotificationStatus::Read;
        notification.updated_at = Utc::now();
        Ok(notification.clone())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let mut flipped = 0;
        for n in self.notifications.lock().unwrap().iter_mut() {
            if n.user_id == user_id && n.status == NotificationStatus::Unread {
                n.status = NotificationStatus::Read;
                n.updated_at = Utc::now();
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| !(n.id == id && n.user_id == user_id));
        if notifications.len() == before {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }
}

fn paginate<T: Clone>(items: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let paged: Vec<T> = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(paged, page, total)
}

// ---------------------------------------------------------------------------
// Fake mailers
// ---------------------------------------------------------------------------

/// Records every message; sends to listed addresses fail.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub attempted: Mutex<Vec<EmailMessage>>,
    pub fail_for: Mutex<HashSet<String>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_for(&self, address: &str) {
        self.fail_for.lock().unwrap().insert(address.to_string());
    }

    pub fn sent_to(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .flat_map(|m| m.to.clone())
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        self.attempted.lock().unwrap().push(message.clone());
        let failing = self.fail_for.lock().unwrap();
        if message.to.iter().any(|to| failing.contains(to)) {
            return Err(AppError::delivery("SMTP transport refused the message"));
        }
        drop(failing);
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Never completes within any reasonable timeout.
pub struct StalledMailer;

#[async_trait]
impl Mailer for StalledMailer {
    async fn send(&self, _message: &EmailMessage) -> AppResult<()> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stalled"
    }
}

// ---------------------------------------------------------------------------
// Wiring helper
// ---------------------------------------------------------------------------

/// Everything a test needs, wired the way `main` wires production.
pub struct TestHarness {
    pub users: Arc<InMemoryUserStore>,
    pub caregivers: Arc<InMemoryCaregiverStore>,
    pub bookings: Arc<InMemoryBookingStore>,
    pub notifications: Arc<InMemoryNotificationStore>,
    pub mailer: Arc<RecordingMailer>,
    pub notification_service: NotificationService,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub emergency_service: EmergencyService,
}

impl TestHarness {
    /// Wire services over the given directory contents.
    pub fn new(users: Vec<User>, caregivers: Vec<CaregiverWithUser>) -> Self {
        let user_store = InMemoryUserStore::with_users(users);
        let caregiver_store = InMemoryCaregiverStore::with_profiles(caregivers);
        let booking_store = InMemoryBookingStore::empty();
        let notification_store = InMemoryNotificationStore::empty();
        let mailer = RecordingMailer::new();

        Self::with_mailer(
            user_store,
            caregiver_store,
            booking_store,
            notification_store,
            mailer.clone(),
            mailer,
        )
    }

    /// Wire services with an explicit mailer implementation; the
    /// `recorder` handle is kept for assertions even when a different
    /// mailer is plugged into the dispatcher.
    pub fn with_mailer(
        user_store: Arc<InMemoryUserStore>,
        caregiver_store: Arc<InMemoryCaregiverStore>,
        booking_store: Arc<InMemoryBookingStore>,
        notification_store: Arc<InMemoryNotificationStore>,
        mailer: Arc<dyn Mailer>,
        recorder: Arc<RecordingMailer>,
    ) -> Self {
        let auth_config = AuthConfig::default();
        let user_service = Arc::new(UserService::new(
            user_store.clone(),
            caregiver_store.clone(),
            PasswordHasher::new(),
            &auth_config,
        ));
        let booking_service = Arc::new(BookingService::new(
            booking_store.clone(),
            caregiver_store.clone(),
        ));
        let dispatcher = Arc::new(NotificationDispatcher::new(
            notification_store.clone(),
            user_store.clone(),
            mailer,
            "http://localhost:3000".to_string(),
            Duration::from_millis(200),
        ));
        let notification_service = NotificationService::new(notification_store.clone());
        let emergency_service = EmergencyService::new(
            user_store.clone(),
            booking_store.clone(),
            booking_service,
            user_service,
            dispatcher.clone(),
        );

        Self {
            users: user_store,
            caregivers: caregiver_store,
            bookings: booking_store,
            notifications: notification_store,
            mailer: recorder,
            notification_service,
            dispatcher,
            emergency_service,
        }
    }
}
