//! PostgreSQL repository implementations of the store traits.

pub mod booking;
pub mod caregiver;
pub mod notification;
pub mod user;

pub use booking::BookingRepository;
pub use caregiver::CaregiverRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
