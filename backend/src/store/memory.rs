use super::{MessageStore, RewardStore, TaskStore};
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sparkvibe_shared::models::{
    DailyProgress, Message, MessagePreferencesUpdate, MorningTask, NewMessage,
    UserMessagePreferences, UserRewards,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store
///
/// `set_unavailable(true)` makes every call fail, which is how tests
/// exercise the engines' store-failure paths.
#[derive(Default)]
pub struct MemoryStore {
    rewards: RwLock<HashMap<Uuid, UserRewards>>,
    progress: RwLock<HashMap<Uuid, BTreeMap<NaiveDate, DailyProgress>>>,
    messages: RwLock<Vec<Message>>,
    preferences: RwLock<HashMap<Uuid, UserMessagePreferences>>,
    /// `(owner, task)` in creation order
    tasks: RwLock<Vec<(Uuid, MorningTask)>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("memory store marked unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl RewardStore for MemoryStore {
    async fn load_rewards(&self, user_id: Uuid) -> Result<Option<UserRewards>> {
        self.check()?;
        Ok(self.rewards.read().await.get(&user_id).cloned())
    }

    async fn save_rewards(&self, user_id: Uuid, rewards: &UserRewards) -> Result<()> {
        self.check()?;
        self.rewards.write().await.insert(user_id, rewards.clone());
        Ok(())
    }

    async fn save_daily_progress(&self, user_id: Uuid, progress: &DailyProgress) -> Result<()> {
        self.check()?;
        self.progress
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(progress.date, progress.clone());
        Ok(())
    }

    async fn daily_progress_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyProgress>> {
        self.check()?;
        let progress = self.progress.read().await;
        Ok(progress
            .get(&user_id)
            .map(|days| days.range(start..=end).rev().map(|(_, p)| p.clone()).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn list_messages(&self) -> Result<Vec<Message>> {
        self.check()?;
        Ok(self.messages.read().await.clone())
    }

    async fn count_messages(&self) -> Result<u64> {
        self.check()?;
        Ok(self.messages.read().await.len() as u64)
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<Message> {
        self.check()?;
        let stored = Message {
            id: Uuid::new_v4(),
            text: message.text.clone(),
            category: message.category,
            mood: message.mood,
            length: message.length,
            tags: message.tags.clone(),
            created_at: Utc::now(),
        };
        self.messages.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn load_preferences(&self, user_id: Uuid) -> Result<Option<UserMessagePreferences>> {
        self.check()?;
        Ok(self.preferences.read().await.get(&user_id).cloned())
    }

    async fn merge_preferences(
        &self,
        user_id: Uuid,
        update: &MessagePreferencesUpdate,
    ) -> Result<UserMessagePreferences> {
        self.check()?;
        let mut preferences = self.preferences.write().await;
        let entry = preferences.entry(user_id).or_default();
        update.apply_to(entry);
        Ok(entry.clone())
    }

    async fn save_history(&self, user_id: Uuid, history: &[Uuid]) -> Result<()> {
        self.check()?;
        self.preferences
            .write()
            .await
            .entry(user_id)
            .or_default()
            .last_message_ids = history.to_vec();
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(
        &self,
        user_id: Uuid,
        title: &str,
        is_custom: bool,
        created_at: DateTime<Utc>,
    ) -> Result<MorningTask> {
        self.check()?;
        let task = MorningTask {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            completed: false,
            created_at,
            completed_at: None,
            is_custom,
        };
        self.tasks.write().await.push((user_id, task.clone()));
        Ok(task)
    }

    async fn find_task_created_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<MorningTask>> {
        self.check()?;
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|(owner, t)| *owner == user_id && t.created_at >= start && t.created_at < end)
            .map(|(_, t)| t)
            .max_by_key(|t| t.created_at)
            .cloned())
    }

    async fn find_task(&self, user_id: Uuid, task_id: Uuid) -> Result<Option<MorningTask>> {
        self.check()?;
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .find(|(owner, t)| *owner == user_id && t.id == task_id)
            .map(|(_, t)| t.clone()))
    }

    async fn mark_task_completed(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<Option<MorningTask>> {
        self.check()?;
        let mut tasks = self.tasks.write().await;
        let Some((_, task)) = tasks
            .iter_mut()
            .find(|(owner, t)| *owner == user_id && t.id == task_id && !t.completed)
        else {
            return Ok(None);
        };
        task.completed = true;
        task.completed_at = Some(completed_at);
        Ok(Some(task.clone()))
    }

    async fn reopen_task(&self, user_id: Uuid, task_id: Uuid) -> Result<()> {
        self.check()?;
        let mut tasks = self.tasks.write().await;
        if let Some((_, task)) = tasks
            .iter_mut()
            .find(|(owner, t)| *owner == user_id && t.id == task_id)
        {
            task.completed = false;
            task.completed_at = None;
        }
        Ok(())
    }

    async fn recent_tasks(&self, user_id: Uuid, limit: u32) -> Result<Vec<MorningTask>> {
        self.check()?;
        let mut owned: Vec<MorningTask> = self
            .tasks
            .read()
            .await
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, t)| t.clone())
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned.truncate(limit as usize);
        Ok(owned)
    }

    async fn task_completion_history(&self, user_id: Uuid) -> Result<Vec<(DateTime<Utc>, bool)>> {
        let tasks = self.recent_tasks(user_id, u32::MAX).await?;
        Ok(tasks.into_iter().map(|t| (t.created_at, t.completed)).collect())
    }
}
