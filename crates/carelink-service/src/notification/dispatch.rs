//! Notification dispatch — persists one notification per recipient and
//! optionally attempts email delivery per recipient.
//!
//! Persistence and email are independent failure domains: a total email
//! outage still leaves every recipient with a readable in-app
//! notification, and no per-recipient failure of either stage aborts the
//! remaining recipients.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use carelink_core::result::AppResult;
use carelink_database::stores::{NotificationStore, UserStore};
use carelink_email::templates::{self, EmergencyAlert};
use carelink_email::Mailer;
use carelink_entity::notification::{NewNotification, Notification, NotificationKind};
use carelink_entity::user::User;

/// A request to notify a set of users about one event.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Recipient user IDs. Duplicates are removed before dispatch.
    pub recipient_ids: Vec<Uuid>,
    /// Notification kind; also selects the email template.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Structured metadata stored with each notification.
    pub metadata: serde_json::Value,
    /// Whether to attempt email delivery per recipient.
    pub send_email: bool,
}

/// The stage at which a per-recipient delivery failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStage {
    /// The notification row could not be written.
    Persist,
    /// The email could not be delivered.
    Email,
}

/// A single recipient's delivery failure.
#[derive(Debug, Clone)]
pub struct DispatchFailure {
    /// The recipient whose delivery failed.
    pub user_id: Uuid,
    /// The stage that failed.
    pub stage: DeliveryStage,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Outcome of a dispatch: what was persisted and what failed.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Notifications successfully persisted, one per recipient.
    pub notifications: Vec<Notification>,
    /// Per-recipient failures, in both stages.
    pub failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    /// Whether every recipient was fully served in both stages.
    pub fn fully_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fans a single event out to many recipients.
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationStore>,
    users: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    /// Base URL of the web client, rendered into email bodies.
    dashboard_url: String,
    /// Upper bound on a single email send attempt.
    email_timeout: Duration,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        dashboard_url: String,
        email_timeout: Duration,
    ) -> Self {
        Self {
            notifications,
            users,
            mailer,
            dashboard_url,
            email_timeout,
        }
    }

    /// Dispatches a notification to every recipient.
    ///
    /// Returns a report of persisted rows and per-recipient failures.
    /// The call itself only errs on malformed input, never on downstream
    /// persistence or delivery trouble.
    pub async fn dispatch(&self, request: DispatchRequest) -> AppResult<DispatchReport> {
        let recipients = dedupe(&request.recipient_ids);
        let mut report = DispatchReport::default();

        for &user_id in &recipients {
            let new = NewNotification::new(
                user_id,
                request.kind,
                request.title.clone(),
                request.message.clone(),
                request.metadata.clone(),
            );
            match self.notifications.create(&new).await {
                Ok(notification) => report.notifications.push(notification),
                Err(e) => {
                    warn!(%user_id, error = %e, "Failed to persist notification");
                    report.failures.push(DispatchFailure {
                        user_id,
                        stage: DeliveryStage::Persist,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if request.send_email {
            self.send_emails(&recipients, &request, &mut report).await;
        }

        Ok(report)
    }

    /// Attempts email delivery for every recipient, recording failures.
    async fn send_emails(
        &self,
        recipients: &[Uuid],
        request: &DispatchRequest,
        report: &mut DispatchReport,
    ) {
        let users = match self.users.find_by_ids(recipients).await {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "Failed to resolve recipients for email delivery");
                for &user_id in recipients {
                    report.failures.push(DispatchFailure {
                        user_id,
                        stage: DeliveryStage::Email,
                        reason: format!("Recipient lookup failed: {e}"),
                    });
                }
                return;
            }
        };

        for user in &users {
            let message = self.render_email(user, request);
            let send = self.mailer.send(&message);
            let outcome = match tokio::time::timeout(self.email_timeout, send).await {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(_) => format!(
                    "Email send timed out after {}s",
                    self.email_timeout.as_secs()
                ),
            };
            warn!(user_id = %user.id, email = %user.email, reason = %outcome, "Email delivery failed");
            report.failures.push(DispatchFailure {
                user_id: user.id,
                stage: DeliveryStage::Email,
                reason: outcome,
            });
        }
    }

    /// Renders the email for one recipient, choosing the emergency
    /// template for emergency notifications and the generic one otherwise.
    fn render_email(&self, user: &User, request: &DispatchRequest) -> carelink_email::EmailMessage {
        if request.kind == NotificationKind::Emergency {
            let meta = &request.metadata;
            let alert = EmergencyAlert {
                recipient_name: &user.name,
                customer_name: meta
                    .get("customerName")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Customer"),
                customer_phone: meta.get("customerPhone").and_then(|v| v.as_str()),
                address: meta.get("address").and_then(|v| v.as_str()).unwrap_or(""),
                notes: meta.get("notes").and_then(|v| v.as_str()),
                dashboard_url: &self.dashboard_url,
            };
            templates::emergency_alert(&user.email, &alert)
        } else {
            templates::generic_notification(
                &user.email,
                &request.title,
                &request.message,
                &self.dashboard_url,
            )
        }
    }
}

/// Remove duplicate recipient IDs, preserving first-seen order.
fn dedupe(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(**id))
        .copied()
        .collect()
}
