//! Message catalog and message preference repositories

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sparkvibe_shared::models::{
    Message, MessagePreferencesUpdate, NewMessage, UserMessagePreferences,
};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Row of `messages`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: Uuid,
    pub text: String,
    pub category: String,
    pub mood: String,
    pub length: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MessageRecord> for Message {
    type Error = anyhow::Error;

    fn try_from(record: MessageRecord) -> Result<Self> {
        Ok(Self {
            id: record.id,
            text: record.text,
            category: record.category.parse()?,
            mood: record.mood.parse()?,
            length: record.length.parse()?,
            tags: record.tags,
            created_at: record.created_at,
        })
    }
}

pub struct MessageRepository;

impl MessageRepository {
    /// Whole catalog in insertion order
    pub async fn list(pool: &PgPool) -> Result<Vec<Message>> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, text, category, mood, length, tags, created_at
            FROM messages
            ORDER BY seq
            "#,
        )
        .fetch_all(pool)
        .await?;

        records.into_iter().map(Message::try_from).collect()
    }

    pub async fn count(pool: &PgPool) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
            .fetch_one(pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    pub async fn insert(pool: &PgPool, message: &NewMessage) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (text, category, mood, length, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, text, category, mood, length, tags, created_at
            "#,
        )
        .bind(&message.text)
        .bind(message.category.as_str())
        .bind(message.mood.as_str())
        .bind(message.length.as_str())
        .bind(&message.tags)
        .fetch_one(pool)
        .await?;

        Message::try_from(record)
    }
}

// ============================================================================
// Preferences (JSONB document on the user row)
// ============================================================================

pub struct MessagePreferencesRepository;

impl MessagePreferencesRepository {
    /// `None` when the user row does not exist
    pub async fn find(pool: &PgPool, user_id: Uuid) -> Result<Option<UserMessagePreferences>> {
        let prefs = sqlx::query_scalar::<_, Json<UserMessagePreferences>>(
            "SELECT message_preferences FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(prefs.map(|json| json.0))
    }

    /// Merge the supplied fields into the stored document
    pub async fn merge(
        pool: &PgPool,
        user_id: Uuid,
        update: &MessagePreferencesUpdate,
    ) -> Result<UserMessagePreferences> {
        let prefs = sqlx::query_scalar::<_, Json<UserMessagePreferences>>(
            r#"
            UPDATE users
            SET message_preferences = message_preferences || $2::jsonb,
                updated_at = NOW()
            WHERE id = $1
            RETURNING message_preferences
            "#,
        )
        .bind(user_id)
        .bind(Json(update))
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow!("user {} not found", user_id))?;

        Ok(prefs.0)
    }

    pub async fn set_history(pool: &PgPool, user_id: Uuid, history: &[Uuid]) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET message_preferences =
                jsonb_set(message_preferences, '{last_message_ids}', $2::jsonb, true)
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(Json(history))
        .execute(pool)
        .await?;

        Ok(())
    }
}
