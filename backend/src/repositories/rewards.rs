//! Reward record and daily progress repositories

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sparkvibe_shared::models::{Achievement, DailyProgress, UserRewards};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

fn to_u32(value: i32) -> u32 {
    value.max(0) as u32
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Row of `user_rewards`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RewardRecord {
    pub user_id: Uuid,
    pub total_points: i32,
    pub current_level: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_tasks_completed: i32,
    pub achievements: Json<Vec<Achievement>>,
    pub last_task_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RewardRecord> for UserRewards {
    fn from(record: RewardRecord) -> Self {
        Self {
            total_points: to_u32(record.total_points),
            current_level: to_u32(record.current_level).max(1),
            current_streak: to_u32(record.current_streak),
            longest_streak: to_u32(record.longest_streak),
            total_tasks_completed: to_u32(record.total_tasks_completed),
            achievements: record.achievements.0,
            last_task_date: record.last_task_date,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Row of `daily_progress`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyProgressRecord {
    pub date: NaiveDate,
    pub points_earned: i32,
    pub tasks_completed: i32,
    pub streak_bonus: i32,
    pub early_bird_bonus: i32,
    pub perfect_week_bonus: i32,
    pub total_points: i32,
}

impl From<DailyProgressRecord> for DailyProgress {
    fn from(record: DailyProgressRecord) -> Self {
        Self {
            date: record.date,
            points_earned: to_u32(record.points_earned),
            tasks_completed: to_u32(record.tasks_completed),
            streak_bonus: to_u32(record.streak_bonus),
            early_bird_bonus: to_u32(record.early_bird_bonus),
            perfect_week_bonus: to_u32(record.perfect_week_bonus),
            total_points: to_u32(record.total_points),
        }
    }
}

// ============================================================================
// Reward records
// ============================================================================

pub struct RewardRepository;

impl RewardRepository {
    pub async fn find(pool: &PgPool, user_id: Uuid) -> Result<Option<RewardRecord>> {
        let record = sqlx::query_as::<_, RewardRecord>(
            r#"
            SELECT user_id, total_points, current_level, current_streak, longest_streak,
                   total_tasks_completed, achievements, last_task_date, created_at, updated_at
            FROM user_rewards
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Insert or fully replace the user's record
    pub async fn replace(pool: &PgPool, user_id: Uuid, rewards: &UserRewards) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_rewards (
                user_id, total_points, current_level, current_streak, longest_streak,
                total_tasks_completed, achievements, last_task_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                total_points = EXCLUDED.total_points,
                current_level = EXCLUDED.current_level,
                current_streak = EXCLUDED.current_streak,
                longest_streak = EXCLUDED.longest_streak,
                total_tasks_completed = EXCLUDED.total_tasks_completed,
                achievements = EXCLUDED.achievements,
                last_task_date = EXCLUDED.last_task_date,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(to_i32(rewards.total_points))
        .bind(to_i32(rewards.current_level))
        .bind(to_i32(rewards.current_streak))
        .bind(to_i32(rewards.longest_streak))
        .bind(to_i32(rewards.total_tasks_completed))
        .bind(Json(&rewards.achievements))
        .bind(rewards.last_task_date)
        .bind(rewards.created_at)
        .bind(rewards.updated_at)
        .execute(pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Daily progress
// ============================================================================

pub struct DailyProgressRepository;

impl DailyProgressRepository {
    pub async fn upsert(pool: &PgPool, user_id: Uuid, progress: &DailyProgress) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO daily_progress (
                user_id, date, points_earned, tasks_completed, streak_bonus,
                early_bird_bonus, perfect_week_bonus, total_points
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, date) DO UPDATE SET
                points_earned = EXCLUDED.points_earned,
                tasks_completed = EXCLUDED.tasks_completed,
                streak_bonus = EXCLUDED.streak_bonus,
                early_bird_bonus = EXCLUDED.early_bird_bonus,
                perfect_week_bonus = EXCLUDED.perfect_week_bonus,
                total_points = EXCLUDED.total_points,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(progress.date)
        .bind(to_i32(progress.points_earned))
        .bind(to_i32(progress.tasks_completed))
        .bind(to_i32(progress.streak_bonus))
        .bind(to_i32(progress.early_bird_bonus))
        .bind(to_i32(progress.perfect_week_bonus))
        .bind(to_i32(progress.total_points))
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Entries dated `start..=end`, newest first
    pub async fn find_between(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyProgressRecord>> {
        let records = sqlx::query_as::<_, DailyProgressRecord>(
            r#"
            SELECT date, points_earned, tasks_completed, streak_bonus,
                   early_bird_bonus, perfect_week_bonus, total_points
            FROM daily_progress
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_conversion_clamps_negative_counters() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap();
        let record = RewardRecord {
            user_id: Uuid::new_v4(),
            total_points: -5,
            current_level: 0,
            current_streak: 2,
            longest_streak: 4,
            total_tasks_completed: 6,
            achievements: Json(vec![]),
            last_task_date: Some(at),
            created_at: at,
            updated_at: at,
        };
        let rewards = UserRewards::from(record);
        assert_eq!(rewards.total_points, 0);
        assert_eq!(rewards.current_level, 1);
        assert_eq!(rewards.longest_streak, 4);
    }

    #[test]
    fn test_counter_overflow_saturates() {
        assert_eq!(to_i32(u32::MAX), i32::MAX);
        assert_eq!(to_i32(42), 42);
    }
}
