//! Ordinary booking creation, listing, and status transitions.
//!
//! This service is the "targeted" collaborator the emergency orchestrator
//! delegates to when a specific caregiver is requested: it enforces
//! caregiver verification and availability, and prices the booking from
//! the caregiver's hourly rate.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use carelink_core::error::AppError;
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::stores::{BookingStore, CaregiverStore};
use carelink_entity::booking::{Booking, BookingStatus, NewBooking};
use carelink_entity::user::UserRole;

use crate::context::RequestContext;

/// Width of the availability window checked around a booking's start time.
const CONFLICT_WINDOW_HOURS: i64 = 1;

/// Data for creating a booking with a specific caregiver.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    /// The customer who owns the booking.
    pub customer_id: Uuid,
    /// The requested caregiver profile.
    pub caregiver_id: Uuid,
    /// When care starts.
    pub start_time: DateTime<Utc>,
    /// Care address.
    pub address: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Whether the booking originated from an emergency request.
    pub is_emergency: bool,
}

/// Manages booking creation and lifecycle.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingStore>,
    caregivers: Arc<dyn CaregiverStore>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(bookings: Arc<dyn BookingStore>, caregivers: Arc<dyn CaregiverStore>) -> Self {
        Self {
            bookings,
            caregivers,
        }
    }

    /// Creates a booking with a specific caregiver.
    ///
    /// The caregiver must exist and be verified, and must not have another
    /// non-terminal booking starting inside the availability window.
    pub async fn create_booking(&self, data: CreateBooking) -> AppResult<Booking> {
        if data.address.trim().is_empty() {
            return Err(AppError::validation("Address is required"));
        }

        let profile = self
            .caregivers
            .find_by_id(data.caregiver_id)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver not found"))?;

        if !profile.verified {
            return Err(AppError::validation("Caregiver is not verified"));
        }

        let window = Duration::hours(CONFLICT_WINDOW_HOURS);
        let conflicts = self
            .bookings
            .count_conflicts(profile.id, data.start_time - window, data.start_time + window)
            .await?;
        if conflicts > 0 {
            return Err(AppError::conflict(
                "Caregiver is not available at the requested time",
            ));
        }

        self.bookings
            .create(&NewBooking {
                customer_id: data.customer_id,
                caregiver_id: Some(profile.id),
                start_time: data.start_time,
                address: data.address,
                notes: data.notes,
                price_cents: profile.hourly_rate_cents,
                status: BookingStatus::Requested,
                is_emergency: data.is_emergency,
            })
            .await
    }

    /// Lists the current customer's bookings, newest first.
    pub async fn list_for_customer(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        self.bookings.find_for_customer(ctx.user_id, page).await
    }

    /// Transitions a booking's status.
    ///
    /// Customers may only cancel their own bookings; caregivers and admins
    /// may perform any valid transition. Invalid transitions are rejected.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        next: BookingStatus,
    ) -> AppResult<Booking> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        match ctx.role {
            UserRole::Customer => {
                if booking.customer_id != ctx.user_id {
                    return Err(AppError::not_found("Booking not found"));
                }
                if next != BookingStatus::Cancelled {
                    return Err(AppError::authorization(
                        "Customers may only cancel bookings",
                    ));
                }
            }
            UserRole::Caregiver | UserRole::Admin => {}
        }

        if !booking.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "Cannot transition booking from '{}' to '{}'",
                booking.status, next
            )));
        }

        self.bookings.update_status(booking_id, next).await
    }
}
