//! # carelink-database
//!
//! PostgreSQL connection management, the store traits that services
//! depend on, and their repository implementations.
//!
//! Services hold `Arc<dyn Store>` handles rather than concrete
//! repositories, so tests can substitute in-memory implementations.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod stores;

pub use connection::DatabasePool;
pub use stores::{BookingStore, CaregiverStore, NotificationStore, UserStore};
