//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// Kind of a notification, used for filtering and template selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Emergency care request alert.
    Emergency,
    /// Booking lifecycle notification.
    Booking,
    /// System-level notification.
    System,
    /// General alert.
    Alert,
}

impl NotificationKind {
    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Booking => "booking",
            Self::System => "system",
            Self::Alert => "alert",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
