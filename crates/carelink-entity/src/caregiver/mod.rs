//! Caregiver profile entity.

pub mod model;

pub use model::{CaregiverProfile, CaregiverWithUser};
