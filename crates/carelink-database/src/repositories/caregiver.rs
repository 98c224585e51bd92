//! Caregiver profile repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_entity::caregiver::{CaregiverProfile, CaregiverWithUser};
use carelink_entity::user::User;

use crate::stores::CaregiverStore;

/// Repository for caregiver profile queries.
#[derive(Debug, Clone)]
pub struct CaregiverRepository {
    pool: PgPool,
}

impl CaregiverRepository {
    /// Create a new caregiver repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaregiverStore for CaregiverRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CaregiverProfile>> {
        sqlx::query_as::<_, CaregiverProfile>("SELECT * FROM caregiver_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find caregiver profile", e)
            })
    }

    async fn find_verified(&self) -> AppResult<Vec<CaregiverWithUser>> {
        let rows = sqlx::query(
            "SELECT c.id AS c_id, c.user_id AS c_user_id, c.verified AS c_verified, \
                    c.bio AS c_bio, c.hourly_rate_cents AS c_hourly_rate_cents, \
                    c.created_at AS c_created_at, c.updated_at AS c_updated_at, \
                    u.* \
             FROM caregiver_profiles c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.verified = TRUE \
             ORDER BY c.created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list verified caregivers", e)
        })?;

        rows.into_iter().map(parse_caregiver_with_user).collect()
    }
}

/// Split a joined caregiver+user row into its two entities.
fn parse_caregiver_with_user(row: PgRow) -> AppResult<CaregiverWithUser> {
    let profile = CaregiverProfile {
        id: column(&row, "c_id")?,
        user_id: column(&row, "c_user_id")?,
        verified: column(&row, "c_verified")?,
        bio: column(&row, "c_bio")?,
        hourly_rate_cents: column(&row, "c_hourly_rate_cents")?,
        created_at: column(&row, "c_created_at")?,
        updated_at: column(&row, "c_updated_at")?,
    };
    let user = User::from_row(&row).map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to decode caregiver user", e)
    })?;
    Ok(CaregiverWithUser { profile, user })
}

/// Decode a single column with a database-error wrapper.
fn column<'r, T>(row: &'r PgRow, name: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to decode column '{name}'"),
            e,
        )
    })
}
