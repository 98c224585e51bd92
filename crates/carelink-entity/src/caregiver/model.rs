//! Caregiver profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::User;

/// A caregiver's professional profile, linked to a user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaregiverProfile {
    /// Unique profile identifier.
    pub id: Uuid,
    /// The owning user account.
    pub user_id: Uuid,
    /// Whether the caregiver has passed vetting. Only verified caregivers
    /// receive emergency alerts and accept bookings.
    pub verified: bool,
    /// Short professional biography.
    pub bio: Option<String>,
    /// Hourly rate in cents.
    pub hourly_rate_cents: i64,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A caregiver profile joined with its user account, as returned by
/// directory queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaregiverWithUser {
    /// The caregiver profile.
    pub profile: CaregiverProfile,
    /// The linked user account (name, email, phone).
    pub user: User,
}
