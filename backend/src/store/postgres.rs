use super::{MessageStore, RewardStore, TaskStore};
use crate::repositories::{
    DailyProgressRepository, MessagePreferencesRepository, MessageRepository, RewardRepository,
    TaskRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sparkvibe_shared::models::{
    DailyProgress, Message, MessagePreferencesUpdate, MorningTask, NewMessage,
    UserMessagePreferences, UserRewards,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Store backed by the application database
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RewardStore for PgStore {
    async fn load_rewards(&self, user_id: Uuid) -> Result<Option<UserRewards>> {
        Ok(RewardRepository::find(&self.pool, user_id)
            .await?
            .map(UserRewards::from))
    }

    async fn save_rewards(&self, user_id: Uuid, rewards: &UserRewards) -> Result<()> {
        RewardRepository::replace(&self.pool, user_id, rewards).await
    }

    async fn save_daily_progress(&self, user_id: Uuid, progress: &DailyProgress) -> Result<()> {
        DailyProgressRepository::upsert(&self.pool, user_id, progress).await
    }

    async fn daily_progress_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyProgress>> {
        let records = DailyProgressRepository::find_between(&self.pool, user_id, start, end).await?;
        Ok(records.into_iter().map(DailyProgress::from).collect())
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn list_messages(&self) -> Result<Vec<Message>> {
        MessageRepository::list(&self.pool).await
    }

    async fn count_messages(&self) -> Result<u64> {
        MessageRepository::count(&self.pool).await
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<Message> {
        MessageRepository::insert(&self.pool, message).await
    }

    async fn load_preferences(&self, user_id: Uuid) -> Result<Option<UserMessagePreferences>> {
        MessagePreferencesRepository::find(&self.pool, user_id).await
    }

    async fn merge_preferences(
        &self,
        user_id: Uuid,
        update: &MessagePreferencesUpdate,
    ) -> Result<UserMessagePreferences> {
        MessagePreferencesRepository::merge(&self.pool, user_id, update).await
    }

    async fn save_history(&self, user_id: Uuid, history: &[Uuid]) -> Result<()> {
        MessagePreferencesRepository::set_history(&self.pool, user_id, history).await
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(
        &self,
        user_id: Uuid,
        title: &str,
        is_custom: bool,
        created_at: DateTime<Utc>,
    ) -> Result<MorningTask> {
        let record = TaskRepository::create(&self.pool, user_id, title, is_custom, created_at).await?;
        Ok(record.into())
    }

    async fn find_task_created_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<MorningTask>> {
        Ok(TaskRepository::find_created_between(&self.pool, user_id, start, end)
            .await?
            .map(MorningTask::from))
    }

    async fn find_task(&self, user_id: Uuid, task_id: Uuid) -> Result<Option<MorningTask>> {
        Ok(TaskRepository::find_by_id(&self.pool, user_id, task_id)
            .await?
            .map(MorningTask::from))
    }

    async fn mark_task_completed(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<Option<MorningTask>> {
        Ok(
            TaskRepository::mark_completed(&self.pool, user_id, task_id, completed_at)
                .await?
                .map(MorningTask::from),
        )
    }

    async fn reopen_task(&self, user_id: Uuid, task_id: Uuid) -> Result<()> {
        TaskRepository::reopen(&self.pool, user_id, task_id).await
    }

    async fn recent_tasks(&self, user_id: Uuid, limit: u32) -> Result<Vec<MorningTask>> {
        let records = TaskRepository::list_recent(&self.pool, user_id, i64::from(limit)).await?;
        Ok(records.into_iter().map(MorningTask::from).collect())
    }

    async fn task_completion_history(&self, user_id: Uuid) -> Result<Vec<(DateTime<Utc>, bool)>> {
        TaskRepository::completion_history(&self.pool, user_id).await
    }
}
