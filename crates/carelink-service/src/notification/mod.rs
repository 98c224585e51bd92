//! Notification services: user-facing CRUD and the dispatch fan-out.

pub mod dispatch;
pub mod service;

pub use dispatch::{
    DeliveryStage, DispatchFailure, DispatchReport, DispatchRequest, NotificationDispatcher,
};
pub use service::{NotificationList, NotificationService};
