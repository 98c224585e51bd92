//! Outbound email message model.

use serde::{Deserialize, Serialize};

/// An outbound email, transport-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient addresses (one or many).
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
    /// Plain-text alternative body.
    pub text_body: Option<String>,
}

impl EmailMessage {
    /// Build a message for a single recipient.
    pub fn to_one(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
        text_body: Option<String>,
    ) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            html_body: html_body.into(),
            text_body,
        }
    }
}
