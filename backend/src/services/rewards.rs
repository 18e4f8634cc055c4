//! Reward engine
//!
//! Turns a task-completion event into points, streak, level and achievement
//! changes. The read-modify-write against the store is not transactional:
//! two completions racing for the same user both read the same record and
//! the later write wins.

use crate::clock::Clock;
use crate::error::ApiError;
use crate::store::RewardStore;
use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use metrics::counter;
use sparkvibe_shared::models::{DailyProgress, LeaderboardStats, TaskCompletionReward, UserRewards};
use sparkvibe_shared::rewards::{apply_task_completion, CompletionContext};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

pub struct RewardEngine {
    store: Arc<dyn RewardStore>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl RewardEngine {
    pub fn new(store: Arc<dyn RewardStore>, clock: Arc<dyn Clock>, timezone: Tz) -> Self {
        Self {
            store,
            clock,
            timezone,
        }
    }

    /// Local calendar day of the engine's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.timezone).date_naive()
    }

    async fn load_or_create(&self, user_id: Uuid) -> Result<UserRewards> {
        if let Some(rewards) = self.store.load_rewards(user_id).await? {
            return Ok(rewards);
        }

        let rewards = UserRewards::initial(self.clock.now());
        self.store.save_rewards(user_id, &rewards).await?;
        debug!(%user_id, "Created reward record");
        Ok(rewards)
    }

    /// Award one completed task
    ///
    /// `is_early_bird` is decided by the caller. Store failures propagate so
    /// the caller knows the award did not commit.
    pub async fn record_task_completion(
        &self,
        user_id: Uuid,
        completed_at: DateTime<Utc>,
        is_early_bird: bool,
    ) -> Result<TaskCompletionReward, ApiError> {
        let current = self
            .load_or_create(user_id)
            .await
            .map_err(ApiError::Internal)?;

        let now = self.clock.now();
        let today = now.with_timezone(&self.timezone).date_naive();
        let context = CompletionContext {
            completed_at,
            today,
            last_task_day: current
                .last_task_date
                .map(|at| at.with_timezone(&self.timezone).date_naive()),
            is_early_bird,
            now,
        };

        let outcome = apply_task_completion(&current, &context);

        self.store
            .save_rewards(user_id, &outcome.rewards)
            .await
            .map_err(ApiError::Internal)?;
        self.store
            .save_daily_progress(user_id, &outcome.daily_progress(today))
            .await
            .map_err(ApiError::Internal)?;

        let points = outcome.points_earned();
        counter!("sparkvibe_task_completions_total").increment(1);
        counter!("sparkvibe_points_awarded_total").increment(u64::from(points));
        for achievement in &outcome.unlocked {
            counter!("sparkvibe_achievements_unlocked_total", "achievement" => achievement.id.as_str())
                .increment(1);
            info!(%user_id, achievement = %achievement.id, "Achievement unlocked");
        }

        info!(
            %user_id,
            points,
            streak = outcome.rewards.current_streak,
            level = outcome.rewards.current_level,
            early_bird = is_early_bird,
            "Task completion recorded"
        );

        Ok(TaskCompletionReward {
            points_earned: points,
            new_level: outcome.rewards.current_level,
            achievements_unlocked: outcome.unlocked,
            new_streak: outcome.rewards.current_streak,
        })
    }

    /// Current record, created on first access; `None` if the store fails
    pub async fn get_user_rewards(&self, user_id: Uuid) -> Option<UserRewards> {
        match self.load_or_create(user_id).await {
            Ok(rewards) => Some(rewards),
            Err(e) => {
                error!(%user_id, error = %e, "Failed to load user rewards");
                None
            }
        }
    }

    /// Progress entries from `days` days ago through today, newest first
    pub async fn get_daily_progress(&self, user_id: Uuid, days: u32) -> Vec<DailyProgress> {
        let end = self.today();
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);

        match self.store.daily_progress_between(user_id, start, end).await {
            Ok(progress) => progress,
            Err(e) => {
                error!(%user_id, error = %e, "Failed to load daily progress");
                Vec::new()
            }
        }
    }

    pub async fn get_leaderboard_stats(&self, user_id: Uuid) -> LeaderboardStats {
        self.get_user_rewards(user_id)
            .await
            .map(|rewards| LeaderboardStats::from(&rewards))
            .unwrap_or_default()
    }
}
