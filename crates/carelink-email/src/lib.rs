//! # carelink-email
//!
//! Outbound email delivery for CareLink. The [`Mailer`] trait abstracts
//! the transport; [`build_mailer`] selects an implementation at
//! construction time from configuration: a lettre SMTP transport when an
//! SMTP host is configured, otherwise a console logger so that local and
//! test environments behave identically without mail infrastructure.

pub mod console;
pub mod mailer;
pub mod message;
pub mod smtp;
pub mod templates;

pub use console::ConsoleMailer;
pub use mailer::{build_mailer, Mailer};
pub use message::EmailMessage;
pub use smtp::SmtpMailer;
