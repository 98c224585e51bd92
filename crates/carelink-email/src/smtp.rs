//! SMTP transport via lettre.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use carelink_core::config::email::EmailConfig;
use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;

use crate::mailer::Mailer;
use crate::message::EmailMessage;

/// Sends email through an SMTP relay (STARTTLS, optional credentials).
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl SmtpMailer {
    /// Create a new SMTP mailer from configuration.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build SMTP transport for '{}'", config.smtp_host),
                    e,
                )
            })?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address.clone(),
        })
    }

    /// Assemble a lettre message for one recipient.
    fn build_message(&self, to: &str, email: &EmailMessage) -> AppResult<Message> {
        let from: Mailbox = self.from_address.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid from address '{}'", self.from_address),
                e,
            )
        })?;
        let to: Mailbox = to.parse().map_err(|e| {
            AppError::with_source(ErrorKind::Delivery, format!("Invalid to address '{to}'"), e)
        })?;

        let builder = Message::builder().from(from).to(to).subject(&email.subject);

        let message = match &email.text_body {
            Some(text) => builder
                .multipart(
                    MultiPart::alternative()
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_PLAIN)
                                .body(text.clone()),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_HTML)
                                .body(email.html_body.clone()),
                        ),
                )
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Delivery, "Failed to build email", e)
                })?,
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(email.html_body.clone())
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Delivery, "Failed to build email", e)
                })?,
        };

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        for recipient in &message.to {
            let mail = self.build_message(recipient, message)?;
            self.transport.send(mail).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Delivery,
                    format!("SMTP send to '{recipient}' failed"),
                    e,
                )
            })?;
            info!(to = %recipient, subject = %message.subject, "Email sent");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
