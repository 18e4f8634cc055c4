//! Morning tasks
//!
//! One task per local calendar day. Completing it hands off to the
//! [`RewardEngine`] with the early-bird flag derived from the local
//! completion hour.

use crate::clock::Clock;
use crate::error::ApiError;
use crate::services::RewardEngine;
use crate::store::TaskStore;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use sparkvibe_shared::models::{MorningTask, TaskStats};
use sparkvibe_shared::rewards::is_early_bird;
use sparkvibe_shared::tasks::{calculate_task_stats, DEFAULT_TASKS};
use sparkvibe_shared::types::TaskCompletionResponse;
use sparkvibe_shared::validation::validate_task_title;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Upper bound on `/tasks/history?limit=`
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// UTC instants bounding a local calendar day as `[start, end)`
pub fn local_day_bounds(timezone: Tz, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_of = |d: NaiveDate| {
        let midnight = d.and_time(chrono::NaiveTime::MIN);
        timezone
            .from_local_datetime(&midnight)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            // Zones that skip midnight on a DST change
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    };
    (start_of(day), start_of(day + Duration::days(1)))
}

pub struct TaskService {
    store: Arc<dyn TaskStore>,
    rewards: Arc<RewardEngine>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    early_bird_cutoff_hour: u32,
}

impl TaskService {
    pub fn new(
        store: Arc<dyn TaskStore>,
        rewards: Arc<RewardEngine>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
        early_bird_cutoff_hour: u32,
    ) -> Self {
        Self {
            store,
            rewards,
            clock,
            timezone,
            early_bird_cutoff_hour,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.timezone).date_naive()
    }

    pub fn suggestions() -> Vec<String> {
        DEFAULT_TASKS.iter().map(|t| t.to_string()).collect()
    }

    pub async fn get_todays_task(&self, user_id: Uuid) -> Result<Option<MorningTask>, ApiError> {
        let (start, end) = local_day_bounds(self.timezone, self.today());
        self.store
            .find_task_created_between(user_id, start, end)
            .await
            .map_err(ApiError::Internal)
    }

    /// Create today's task, or return the one already created today
    pub async fn create_todays_task(
        &self,
        user_id: Uuid,
        title: &str,
        is_custom: bool,
    ) -> Result<MorningTask, ApiError> {
        let title = title.trim();
        validate_task_title(title).map_err(ApiError::Validation)?;

        if let Some(existing) = self.get_todays_task(user_id).await? {
            debug!(%user_id, task_id = %existing.id, "Task already exists for today");
            return Ok(existing);
        }

        let task = self
            .store
            .create_task(user_id, title, is_custom, self.clock.now())
            .await
            .map_err(ApiError::Internal)?;
        info!(%user_id, task_id = %task.id, is_custom, "Morning task created");
        Ok(task)
    }

    /// Mark the task done and award it
    ///
    /// If the award fails the task is reopened so the completion can be
    /// retried.
    pub async fn complete_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
    ) -> Result<TaskCompletionResponse, ApiError> {
        let existing = self
            .store
            .find_task(user_id, task_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;
        if existing.completed {
            return Err(ApiError::Conflict("Task already completed".to_string()));
        }

        let completed_at = self.clock.now();
        let task = self
            .store
            .mark_task_completed(user_id, task_id, completed_at)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Conflict("Task already completed".to_string()))?;

        let early = is_early_bird(
            &completed_at.with_timezone(&self.timezone),
            self.early_bird_cutoff_hour,
        );
        let reward = match self
            .rewards
            .record_task_completion(user_id, completed_at, early)
            .await
        {
            Ok(reward) => reward,
            Err(e) => {
                warn!(%user_id, %task_id, "Award failed, reopening task");
                if let Err(reopen) = self.store.reopen_task(user_id, task_id).await {
                    error!(%user_id, %task_id, error = %reopen, "Failed to reopen task");
                }
                return Err(e);
            }
        };

        Ok(TaskCompletionResponse { task, reward })
    }

    /// Most recent tasks, newest first
    pub async fn get_task_history(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<MorningTask>, ApiError> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        self.store
            .recent_tasks(user_id, limit)
            .await
            .map_err(ApiError::Internal)
    }

    pub async fn get_task_stats(&self, user_id: Uuid) -> Result<TaskStats, ApiError> {
        let history = self
            .store
            .task_completion_history(user_id)
            .await
            .map_err(ApiError::Internal)?;

        let days: Vec<(NaiveDate, bool)> = history
            .into_iter()
            .map(|(created_at, completed)| {
                (created_at.with_timezone(&self.timezone).date_naive(), completed)
            })
            .collect();

        Ok(calculate_task_stats(&days, self.today()))
    }
}
