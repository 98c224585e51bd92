//! User account and directory services.

pub mod service;

pub use service::{RegisterUser, UserService};
