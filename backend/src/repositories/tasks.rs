//! Morning task repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use sparkvibe_shared::models::MorningTask;
use sqlx::PgPool;
use uuid::Uuid;

/// Row of `morning_tasks`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<TaskRecord> for MorningTask {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            completed: record.completed,
            created_at: record.created_at,
            completed_at: record.completed_at,
            is_custom: record.is_custom,
        }
    }
}

const TASK_COLUMNS: &str =
    "id, user_id, title, description, completed, is_custom, created_at, completed_at";

pub struct TaskRepository;

impl TaskRepository {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        title: &str,
        is_custom: bool,
        created_at: DateTime<Utc>,
    ) -> Result<TaskRecord> {
        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            INSERT INTO morning_tasks (user_id, title, is_custom, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(title)
        .bind(is_custom)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Most recent task created in `[start, end)`
    pub async fn find_created_between(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM morning_tasks
            WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            "SELECT {TASK_COLUMNS} FROM morning_tasks WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Mark an open task complete; `None` if it is missing or already done
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            UPDATE morning_tasks
            SET completed = TRUE, completed_at = $3
            WHERE id = $1 AND user_id = $2 AND completed = FALSE
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(completed_at)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn reopen(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE morning_tasks
            SET completed = FALSE, completed_at = NULL
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn list_recent(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<TaskRecord>> {
        let records = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM morning_tasks
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// `(created_at, completed)` for every task, newest first
    pub async fn completion_history(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<(DateTime<Utc>, bool)>> {
        let rows = sqlx::query_as::<_, (DateTime<Utc>, bool)>(
            r#"
            SELECT created_at, completed
            FROM morning_tasks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
