//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// SMTP delivery configuration.
///
/// When `smtp_host` is empty, no transport is constructed and outbound
/// mail is logged instead of sent, so local and test environments need
/// no mail infrastructure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP server hostname. Empty means email delivery is not configured.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP server port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Optional SMTP username.
    #[serde(default)]
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// RFC 5322 "From" address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Upper bound on a single send attempt, in seconds.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_seconds: u64,
}

impl EmailConfig {
    /// Whether an SMTP transport can be constructed from this configuration.
    pub fn is_configured(&self) -> bool {
        !self.smtp_host.is_empty()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_user: None,
            smtp_password: None,
            from_address: default_from_address(),
            send_timeout_seconds: default_send_timeout(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@carelink.local".to_string()
}

fn default_send_timeout() -> u64 {
    10
}
