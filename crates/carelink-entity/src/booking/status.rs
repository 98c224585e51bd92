//! Booking status enumeration and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a booking.
///
/// Transitions are monotonic (`requested → confirmed → in_progress →
/// completed`), except that cancellation is reachable from any
/// non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Submitted, awaiting caregiver confirmation.
    Requested,
    /// Accepted by a caregiver.
    Confirmed,
    /// Care is underway.
    InProgress,
    /// Care finished. Terminal.
    Completed,
    /// Cancelled by either party. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Check if this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Check whether a transition to `next` is allowed.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            BookingStatus::Cancelled => true,
            BookingStatus::Confirmed => matches!(self, Self::Requested),
            BookingStatus::InProgress => matches!(self, Self::Confirmed),
            BookingStatus::Completed => matches!(self, Self::InProgress),
            BookingStatus::Requested => false,
        }
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = carelink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requested" => Ok(Self::Requested),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(carelink_core::AppError::validation(format!(
                "Invalid booking status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions() {
        assert!(BookingStatus::Requested.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::InProgress));
        assert!(BookingStatus::InProgress.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn no_skipping_or_rewinding() {
        assert!(!BookingStatus::Requested.can_transition_to(BookingStatus::InProgress));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Requested));
        assert!(!BookingStatus::Requested.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn cancel_from_any_non_terminal() {
        assert!(BookingStatus::Requested.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::InProgress.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Cancelled));
    }
}
