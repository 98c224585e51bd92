//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;
use super::status::NotificationStatus;

/// Maximum title length.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum message length.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// An in-app notification delivered to a single user.
///
/// A fan-out to N recipients produces N independent rows, each
/// independently readable and deletable by its owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Read state.
    pub status: NotificationStatus,
    /// Additional structured data (JSON). For emergency notifications this
    /// carries the booking ID, customer identity/phone, address, and notes.
    pub metadata: serde_json::Value,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }
}

/// Data required to insert a new notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Title, truncated to [`MAX_TITLE_LEN`] characters on insert.
    pub title: String,
    /// Body text, truncated to [`MAX_MESSAGE_LEN`] characters on insert.
    pub message: String,
    /// Additional structured data.
    pub metadata: serde_json::Value,
}

impl NewNotification {
    /// Build a new notification payload, clamping title and message to
    /// their maximum lengths.
    pub fn new(
        user_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: truncate_chars(title.into(), MAX_TITLE_LEN),
            message: truncate_chars(message.into(), MAX_MESSAGE_LEN),
            metadata,
        }
    }
}

/// Truncate a string to at most `max` characters.
fn truncate_chars(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        s
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_title_and_message() {
        let long = "x".repeat(2000);
        let n = NewNotification::new(
            Uuid::new_v4(),
            NotificationKind::Alert,
            long.clone(),
            long,
            serde_json::json!({}),
        );
        assert_eq!(n.title.chars().count(), MAX_TITLE_LEN);
        assert_eq!(n.message.chars().count(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn short_strings_untouched() {
        let n = NewNotification::new(
            Uuid::new_v4(),
            NotificationKind::Emergency,
            "Emergency Care Request",
            "Please respond immediately.",
            serde_json::json!({"address": "12 Oak Street"}),
        );
        assert_eq!(n.title, "Emergency Care Request");
        assert_eq!(n.message, "Please respond immediately.");
    }
}
