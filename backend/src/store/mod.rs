//! Per-user document store used by the reward, message and task services
//!
//! The services only see these traits. [`PgStore`] is the production
//! implementation; [`MemoryStore`] backs tests and database-free runs.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sparkvibe_shared::models::{
    DailyProgress, Message, MessagePreferencesUpdate, MorningTask, NewMessage,
    UserMessagePreferences, UserRewards,
};
use uuid::Uuid;

/// Reward record and daily progress persistence
#[async_trait]
pub trait RewardStore: Send + Sync {
    async fn load_rewards(&self, user_id: Uuid) -> Result<Option<UserRewards>>;

    /// Replace the whole reward record
    async fn save_rewards(&self, user_id: Uuid, rewards: &UserRewards) -> Result<()>;

    /// Write the entry for `progress.date`, replacing any earlier one
    async fn save_daily_progress(&self, user_id: Uuid, progress: &DailyProgress) -> Result<()>;

    /// Entries dated `start..=end`, newest first
    async fn daily_progress_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyProgress>>;
}

/// Message catalog and per-user preference persistence
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Whole catalog in insertion order
    async fn list_messages(&self) -> Result<Vec<Message>>;

    async fn count_messages(&self) -> Result<u64>;

    /// Append to the catalog; the store assigns id and creation time
    async fn insert_message(&self, message: &NewMessage) -> Result<Message>;

    async fn load_preferences(&self, user_id: Uuid) -> Result<Option<UserMessagePreferences>>;

    /// Overwrite only the fields present in `update`
    async fn merge_preferences(
        &self,
        user_id: Uuid,
        update: &MessagePreferencesUpdate,
    ) -> Result<UserMessagePreferences>;

    /// Replace the shown-message history
    async fn save_history(&self, user_id: Uuid, history: &[Uuid]) -> Result<()>;
}

/// Morning task persistence
///
/// Timestamps are supplied by the caller so the service clock decides
/// which local day a task belongs to.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create_task(
        &self,
        user_id: Uuid,
        title: &str,
        is_custom: bool,
        created_at: DateTime<Utc>,
    ) -> Result<MorningTask>;

    /// Most recent task created in `[start, end)`
    async fn find_task_created_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<MorningTask>>;

    /// `None` when the task does not exist or belongs to someone else
    async fn find_task(&self, user_id: Uuid, task_id: Uuid) -> Result<Option<MorningTask>>;

    /// Mark an open task complete; `None` if it is missing or already done
    async fn mark_task_completed(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<Option<MorningTask>>;

    /// Undo [`TaskStore::mark_task_completed`]
    async fn reopen_task(&self, user_id: Uuid, task_id: Uuid) -> Result<()>;

    /// Newest first
    async fn recent_tasks(&self, user_id: Uuid, limit: u32) -> Result<Vec<MorningTask>>;

    /// `(created_at, completed)` for every task, newest first
    async fn task_completion_history(&self, user_id: Uuid) -> Result<Vec<(DateTime<Utc>, bool)>>;
}
