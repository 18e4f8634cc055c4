//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveTime, Utc};
use sparkvibe_shared::models::{NotificationPreferences, UserProfile};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Credentials row used by the auth flows
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile and onboarding columns of `users`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub wake_time: Option<NaiveTime>,
    pub notification_preferences: Json<NotificationPreferences>,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileRecord> for UserProfile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            display_name: record.display_name,
            wake_time: record.wake_time,
            notification_preferences: record.notification_preferences.0,
            onboarding_completed: record.onboarding_completed,
            created_at: record.created_at,
        }
    }
}

/// Onboarding answers; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct OnboardingUpdate {
    pub display_name: Option<String>,
    pub wake_time: Option<NaiveTime>,
    pub notification_preferences: Option<NotificationPreferences>,
}

const PROFILE_COLUMNS: &str = "id, email, display_name, wake_time, notification_preferences, \
                               onboarding_completed, created_at";

pub struct UserRepository;

impl UserRepository {
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash, display_name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    // ========================================================================
    // Profile and onboarding
    // ========================================================================

    pub async fn get_profile(pool: &PgPool, id: Uuid) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Store onboarding answers and set the completed flag
    pub async fn complete_onboarding(
        pool: &PgPool,
        id: Uuid,
        update: OnboardingUpdate,
    ) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            UPDATE users SET
                display_name = COALESCE($2, display_name),
                wake_time = COALESCE($3, wake_time),
                notification_preferences = COALESCE($4, notification_preferences),
                onboarding_completed = TRUE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.display_name)
        .bind(update.wake_time)
        .bind(update.notification_preferences.map(Json))
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    pub async fn update_wake_time(
        pool: &PgPool,
        id: Uuid,
        wake_time: NaiveTime,
    ) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            UPDATE users SET wake_time = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(wake_time)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
