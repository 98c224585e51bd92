//! # carelink-service
//!
//! Business logic services for CareLink. Each service takes its
//! collaborators (stores, mailer, sibling services) as constructor
//! parameters, so tests can substitute in-memory stores and a fake
//! mailer.

pub mod booking;
pub mod context;
pub mod emergency;
pub mod notification;
pub mod user;

pub use context::RequestContext;
