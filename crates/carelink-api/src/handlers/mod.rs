//! HTTP handlers, one module per API area.

pub mod auth;
pub mod booking;
pub mod caregiver;
pub mod emergency;
pub mod health;
pub mod notification;
pub mod user;
