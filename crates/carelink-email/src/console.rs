//! Console fallback transport.

use async_trait::async_trait;
use tracing::info;

use carelink_core::result::AppResult;

use crate::mailer::Mailer;
use crate::message::EmailMessage;

/// Logs outbound email instead of sending it.
///
/// Used when no SMTP transport is configured, so the rest of the system
/// behaves identically in environments without mail infrastructure.
#[derive(Debug, Clone, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    /// Create a new console mailer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        info!(
            to = %message.to.join(", "),
            subject = %message.subject,
            "Email (console fallback)"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
