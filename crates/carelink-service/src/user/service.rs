//! User registration, credential checks, profile management, and the
//! directory lookups consumed by the emergency orchestrator.

use std::sync::Arc;

use uuid::Uuid;

use carelink_auth::PasswordHasher;
use carelink_core::config::auth::AuthConfig;
use carelink_core::error::AppError;
use carelink_core::result::AppResult;
use carelink_database::stores::{CaregiverStore, UserStore};
use carelink_entity::caregiver::CaregiverWithUser;
use carelink_entity::user::{CreateUser, UpdateProfile, User, UserRole};

use crate::context::RequestContext;

/// Data submitted on registration.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    /// Full display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Contact phone number (optional).
    pub phone: Option<String>,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

/// Manages user accounts and serves directory queries.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    caregivers: Arc<dyn CaregiverStore>,
    hasher: PasswordHasher,
    password_min_length: usize,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        caregivers: Arc<dyn CaregiverStore>,
        hasher: PasswordHasher,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            caregivers,
            hasher,
            password_min_length: config.password_min_length,
        }
    }

    /// Registers a new customer account.
    pub async fn register(&self, data: RegisterUser) -> AppResult<User> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if data.password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(&data.password)?;
        self.users
            .create(&CreateUser {
                name: data.name,
                email: data.email,
                phone: data.phone,
                password_hash,
                role: UserRole::Customer,
            })
            .await
    }

    /// Verifies login credentials, returning the user on success.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }
        if !user.is_active {
            return Err(AppError::authentication("Account is deactivated"));
        }

        Ok(user)
    }

    /// Fetches the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        name: Option<String>,
        phone: Option<String>,
    ) -> AppResult<User> {
        self.users
            .update_profile(&UpdateProfile {
                id: ctx.user_id,
                name,
                phone,
            })
            .await
    }

    /// Fetches a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    /// Lists all verified caregivers with their user accounts.
    pub async fn find_verified_caregivers(&self) -> AppResult<Vec<CaregiverWithUser>> {
        self.caregivers.find_verified().await
    }

    /// Lists all active admin users.
    pub async fn find_active_admins(&self) -> AppResult<Vec<User>> {
        self.users.find_active_admins().await
    }
}
