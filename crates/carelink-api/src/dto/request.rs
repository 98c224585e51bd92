//! Request DTOs with validation.
//!
//! Field names are camelCase on the wire, matching the web client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use carelink_core::error::AppError;

/// Run derive-based validation, mapping failures to a validation error.
pub fn validate(req: &impl Validate) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(flatten_errors(&e)))
}

/// Collapse validator's error tree into one human-readable line.
fn flatten_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            match &err.message {
                Some(msg) => parts.push(msg.to_string()),
                None => parts.push(format!("Invalid value for '{field}'")),
            }
        }
    }
    if parts.is_empty() {
        "Invalid request".to_string()
    } else {
        parts.join("; ")
    }
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Full display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}

/// Emergency request submission body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmergencyRequest {
    /// Specific caregiver to request; absent means broadcast to all.
    pub caregiver_id: Option<Uuid>,
    /// Care address.
    #[validate(length(min = 10, message = "Address must be at least 10 characters"))]
    pub address: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Override contact phone for this request.
    pub phone: Option<String>,
}

/// Ordinary booking creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// The caregiver to book.
    pub caregiver_id: Uuid,
    /// When care starts.
    pub start_time: DateTime<Utc>,
    /// Care address.
    #[validate(length(min = 10, message = "Address must be at least 10 characters"))]
    pub address: String,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Booking status transition body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    /// The target status.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_address_fails_validation() {
        let req: CreateEmergencyRequest = serde_json::from_str(
            r#"{"address": "short", "notes": "help", "phone": "555-1234"}"#,
        )
        .unwrap();
        let err = validate(&req).unwrap_err();
        assert!(err.message.contains("at least 10 characters"));
    }

    #[test]
    fn valid_emergency_request_passes() {
        let req: CreateEmergencyRequest =
            serde_json::from_str(r#"{"address": "12 Oak Street, Springfield"}"#).unwrap();
        assert!(validate(&req).is_ok());
        assert!(req.caregiver_id.is_none());
    }

    #[test]
    fn caregiver_id_is_camel_case() {
        let id = Uuid::new_v4();
        let req: CreateEmergencyRequest = serde_json::from_str(&format!(
            r#"{{"caregiverId": "{id}", "address": "12 Oak Street, Springfield"}}"#
        ))
        .unwrap();
        assert_eq!(req.caregiver_id, Some(id));
    }
}
