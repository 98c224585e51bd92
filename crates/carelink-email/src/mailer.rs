//! The `Mailer` transport strategy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use carelink_core::config::email::EmailConfig;
use carelink_core::result::AppResult;

use crate::console::ConsoleMailer;
use crate::message::EmailMessage;
use crate::smtp::SmtpMailer;

/// Sends outbound email.
///
/// Implementations report transport failures through the returned
/// `Result`; callers in the dispatch path treat delivery as
/// fire-and-forget per recipient and must not let a send failure
/// propagate past the recipient it belongs to.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send a single message to all of its recipients.
    async fn send(&self, message: &EmailMessage) -> AppResult<()>;

    /// Name of the transport, for logs.
    fn name(&self) -> &'static str;
}

/// Select a transport from configuration.
///
/// SMTP host configured → [`SmtpMailer`]; otherwise [`ConsoleMailer`],
/// which logs messages instead of sending them.
pub fn build_mailer(config: &EmailConfig) -> AppResult<Arc<dyn Mailer>> {
    if config.is_configured() {
        let mailer = SmtpMailer::new(config)?;
        info!(host = %config.smtp_host, "Email transport initialized (SMTP)");
        Ok(Arc::new(mailer))
    } else {
        info!("SMTP not configured, outbound email will be logged only");
        Ok(Arc::new(ConsoleMailer::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_console_when_unconfigured() {
        let mailer = build_mailer(&EmailConfig::default()).unwrap();
        assert_eq!(mailer.name(), "console");
    }

    #[test]
    fn selects_smtp_when_host_present() {
        let config = EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            ..EmailConfig::default()
        };
        let mailer = build_mailer(&config).unwrap();
        assert_eq!(mailer.name(), "smtp");
    }
}
