//! Emergency request orchestrator.
//!
//! Validates an emergency submission, creates (or delegates) the booking
//! that represents it, resolves the alert audience (every verified
//! caregiver plus every active admin), and dispatches in-app and email
//! notifications. Once the booking is written, no notification failure
//! rolls it back or surfaces to the submitting customer.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use carelink_core::error::AppError;
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::stores::{BookingStore, UserStore};
use carelink_entity::booking::{
    Booking, BookingStatus, NewBooking, EMERGENCY_NOTES_MARKER,
};
use carelink_entity::notification::NotificationKind;
use carelink_entity::user::User;

use crate::booking::{BookingService, CreateBooking};
use crate::context::RequestContext;
use crate::notification::{DispatchRequest, NotificationDispatcher};
use crate::user::UserService;

/// Notes used when the customer provides none.
const DEFAULT_NOTES: &str = "Emergency care request";

/// Data submitted with an emergency request.
#[derive(Debug, Clone)]
pub struct CreateEmergencyRequest {
    /// Specific caregiver to request, if any. Absent means broadcast.
    pub caregiver_id: Option<Uuid>,
    /// Care address.
    pub address: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Override contact phone for this request.
    pub phone: Option<String>,
}

/// Who the emergency booking is aimed at.
///
/// Keeping both paths behind one tag centralizes the invariant that a
/// zero price is only ever written for broadcast bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyTarget {
    /// No specific caregiver; alert the whole audience.
    Broadcast,
    /// A specific caregiver was requested.
    Caregiver(Uuid),
}

impl EmergencyTarget {
    /// Build a target from the optional caregiver ID of a submission.
    pub fn from_caregiver_id(caregiver_id: Option<Uuid>) -> Self {
        match caregiver_id {
            Some(id) => Self::Caregiver(id),
            None => Self::Broadcast,
        }
    }
}

/// Orchestrates emergency request creation and alert fan-out.
#[derive(Clone)]
pub struct EmergencyService {
    users: Arc<dyn UserStore>,
    bookings: Arc<dyn BookingStore>,
    booking_service: Arc<BookingService>,
    user_service: Arc<UserService>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl EmergencyService {
    /// Creates a new emergency service.
    pub fn new(
        users: Arc<dyn UserStore>,
        bookings: Arc<dyn BookingStore>,
        booking_service: Arc<BookingService>,
        user_service: Arc<UserService>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            users,
            bookings,
            booking_service,
            user_service,
            dispatcher,
        }
    }

    /// Creates an emergency request and alerts the caregiver/admin
    /// audience.
    ///
    /// Booking creation failures propagate as-is; audience resolution or
    /// dispatch failures after the booking write are logged and swallowed
    /// so the emergency still stands.
    pub async fn create_emergency_request(
        &self,
        ctx: &RequestContext,
        request: CreateEmergencyRequest,
    ) -> AppResult<Booking> {
        let customer = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;

        if request.address.trim().is_empty() {
            return Err(AppError::validation("Address is required"));
        }

        let target = EmergencyTarget::from_caregiver_id(request.caregiver_id);
        let booking = self
            .create_emergency_booking(&customer, target, &request)
            .await?;

        info!(
            booking_id = %booking.id,
            customer_id = %customer.id,
            broadcast = request.caregiver_id.is_none(),
            "Emergency request created"
        );

        self.notify_audience(&customer, &booking, &request).await;

        Ok(booking)
    }

    /// Lists emergency bookings still awaiting care, newest first.
    pub async fn list_emergency_requests(
        &self,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        self.bookings.find_emergencies(page).await
    }

    /// Single creation path for both targeted and broadcast emergencies.
    async fn create_emergency_booking(
        &self,
        customer: &User,
        target: EmergencyTarget,
        request: &CreateEmergencyRequest,
    ) -> AppResult<Booking> {
        match target {
            // Targeted: delegate to ordinary creation, which enforces
            // caregiver verification and availability and sets the price.
            EmergencyTarget::Caregiver(caregiver_id) => {
                self.booking_service
                    .create_booking(CreateBooking {
                        customer_id: customer.id,
                        caregiver_id,
                        start_time: Utc::now(),
                        address: request.address.clone(),
                        notes: Some(
                            request
                                .notes
                                .clone()
                                .unwrap_or_else(|| DEFAULT_NOTES.to_string()),
                        ),
                        is_emergency: true,
                    })
                    .await
            }
            // Broadcast: no caregiver yet, so availability checks do not
            // apply and the price stays zero until one accepts.
            EmergencyTarget::Broadcast => {
                let notes = format!(
                    "{} {}",
                    request.notes.as_deref().unwrap_or(DEFAULT_NOTES),
                    EMERGENCY_NOTES_MARKER
                );
                self.bookings
                    .create(&NewBooking {
                        customer_id: customer.id,
                        caregiver_id: None,
                        start_time: Utc::now(),
                        address: request.address.clone(),
                        notes: Some(notes),
                        price_cents: 0,
                        status: BookingStatus::Requested,
                        is_emergency: true,
                    })
                    .await
            }
        }
    }

    /// Resolves the audience and dispatches the alert. Never fails the
    /// caller: the booking is already persisted.
    async fn notify_audience(
        &self,
        customer: &User,
        booking: &Booking,
        request: &CreateEmergencyRequest,
    ) {
        let recipients = match self.resolve_audience().await {
            Ok(recipients) => recipients,
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Failed to resolve emergency audience");
                return;
            }
        };

        if recipients.is_empty() {
            warn!(booking_id = %booking.id, "No verified caregivers or active admins to notify");
            return;
        }

        let title = "Emergency Care Request".to_string();
        let message = format!(
            "Emergency care request from {} at {}. {}",
            customer.name,
            request.address,
            request
                .notes
                .as_deref()
                .map(|n| format!("Details: {n}"))
                .unwrap_or_else(|| "Please respond immediately.".to_string())
        );
        let metadata = serde_json::json!({
            "bookingId": booking.id,
            "customerId": customer.id,
            "customerName": customer.name,
            "customerPhone": request.phone.clone().or_else(|| customer.phone.clone()),
            "address": request.address,
            "notes": request.notes,
            "caregiverId": request.caregiver_id,
        });

        match self
            .dispatcher
            .dispatch(DispatchRequest {
                recipient_ids: recipients,
                kind: NotificationKind::Emergency,
                title,
                message,
                metadata,
                send_email: true,
            })
            .await
        {
            Ok(report) => {
                info!(
                    booking_id = %booking.id,
                    notified = report.notifications.len(),
                    failures = report.failures.len(),
                    "Emergency alerts dispatched"
                );
                if !report.fully_delivered() {
                    warn!(
                        booking_id = %booking.id,
                        failures = report.failures.len(),
                        "Some emergency alert deliveries failed"
                    );
                }
            }
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Emergency alert dispatch failed");
            }
        }
    }

    /// Every verified caregiver's user plus every active admin, deduped by
    /// the dispatcher before fan-out.
    async fn resolve_audience(&self) -> AppResult<Vec<Uuid>> {
        let caregivers = self.user_service.find_verified_caregivers().await?;
        let admins = self.user_service.find_active_admins().await?;

        let mut recipients: Vec<Uuid> = caregivers.iter().map(|c| c.user.id).collect();
        recipients.extend(admins.iter().map(|a| a.id));
        Ok(recipients)
    }
}
