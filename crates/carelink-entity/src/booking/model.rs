//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// Marker appended to the notes of a broadcast emergency booking.
pub const EMERGENCY_NOTES_MARKER: &str = "[EMERGENCY]";

/// A care booking. Bookings are never deleted, only status-transitioned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The customer who owns the booking.
    pub customer_id: Uuid,
    /// The assigned caregiver profile. Absent for broadcast emergency
    /// requests until a caregiver accepts.
    pub caregiver_id: Option<Uuid>,
    /// When care starts. Set to the request time on the emergency path.
    pub start_time: DateTime<Utc>,
    /// Care address, free text.
    pub address: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Price in cents. Zero for unresolved emergency bookings; assigned
    /// once a caregiver accepts.
    pub price_cents: i64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Whether the booking originated from an emergency request.
    pub is_emergency: bool,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Check if the booking's notes carry the emergency marker.
    pub fn has_emergency_marker(&self) -> bool {
        self.notes
            .as_deref()
            .map(|n| n.contains(EMERGENCY_NOTES_MARKER))
            .unwrap_or(false)
    }
}

/// Data required to insert a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    /// The customer who owns the booking.
    pub customer_id: Uuid,
    /// The assigned caregiver profile, if any.
    pub caregiver_id: Option<Uuid>,
    /// When care starts.
    pub start_time: DateTime<Utc>,
    /// Care address.
    pub address: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Price in cents.
    pub price_cents: i64,
    /// Initial lifecycle status.
    pub status: BookingStatus,
    /// Whether the booking originated from an emergency request.
    pub is_emergency: bool,
}
