//! Data models for the SparkVibe application
//!
//! Every per-user record here is owned by exactly one user; the message
//! catalog and the achievement catalog are shared and read-only.

use crate::errors::ModelError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Achievements
// ============================================================================

/// Achievement grouping shown in the achievements screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Daily,
    Streak,
    Milestone,
    Special,
}

/// Identifier of an entry in the fixed achievement catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstTask,
    WeekWarrior,
    MonthMaster,
    EarlyRiser,
    TaskExplorer,
    ConsistencyKing,
    PerfectWeek,
}

/// Static catalog entry for an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
}

impl AchievementId {
    /// Catalog order
    pub const ALL: [AchievementId; 7] = [
        AchievementId::FirstTask,
        AchievementId::WeekWarrior,
        AchievementId::MonthMaster,
        AchievementId::EarlyRiser,
        AchievementId::TaskExplorer,
        AchievementId::ConsistencyKing,
        AchievementId::PerfectWeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstTask => "first_task",
            AchievementId::WeekWarrior => "week_warrior",
            AchievementId::MonthMaster => "month_master",
            AchievementId::EarlyRiser => "early_riser",
            AchievementId::TaskExplorer => "task_explorer",
            AchievementId::ConsistencyKing => "consistency_king",
            AchievementId::PerfectWeek => "perfect_week",
        }
    }

    /// Catalog definition for this id
    pub fn definition(&self) -> AchievementDefinition {
        let (name, description, icon, category) = match self {
            AchievementId::FirstTask => (
                "First Steps",
                "Complete your first morning task",
                "🌱",
                AchievementCategory::Milestone,
            ),
            AchievementId::WeekWarrior => (
                "Week Warrior",
                "Complete 7 days in a row",
                "🔥",
                AchievementCategory::Streak,
            ),
            AchievementId::MonthMaster => (
                "Month Master",
                "Complete 30 days in a row",
                "👑",
                AchievementCategory::Streak,
            ),
            AchievementId::EarlyRiser => (
                "Early Riser",
                "Complete 5 tasks before 7 AM",
                "🌅",
                AchievementCategory::Milestone,
            ),
            AchievementId::TaskExplorer => (
                "Task Explorer",
                "Try 10 different types of tasks",
                "🧭",
                AchievementCategory::Milestone,
            ),
            AchievementId::ConsistencyKing => (
                "Consistency King",
                "Maintain a 14-day streak",
                "⚡",
                AchievementCategory::Streak,
            ),
            AchievementId::PerfectWeek => (
                "Perfect Week",
                "Complete every day for a week",
                "⭐",
                AchievementCategory::Streak,
            ),
        };

        AchievementDefinition {
            id: *self,
            name,
            description,
            icon,
            category,
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AchievementId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ModelError::UnknownAchievement(s.to_string()))
    }
}

/// An unlocked achievement: a copy of the catalog entry plus the unlock time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: AchievementCategory,
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    /// Build an unlock record from the catalog
    pub fn unlock(id: AchievementId, unlocked_at: DateTime<Utc>) -> Self {
        let def = id.definition();
        Self {
            id,
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            category: def.category,
            unlocked_at,
        }
    }
}

// ============================================================================
// Rewards
// ============================================================================

/// Per-user reward record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRewards {
    pub total_points: u32,
    pub current_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_tasks_completed: u32,
    /// Unique by id, in unlock order
    pub achievements: Vec<Achievement>,
    pub last_task_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRewards {
    /// Fresh record for a user who has never completed a task
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            total_points: 0,
            current_level: 1,
            current_streak: 0,
            longest_streak: 0,
            total_tasks_completed: 0,
            achievements: Vec::new(),
            last_task_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }
}

/// Points earned on one calendar day, keyed by the local ISO date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub points_earned: u32,
    pub tasks_completed: u32,
    pub streak_bonus: u32,
    pub early_bird_bonus: u32,
    pub perfect_week_bonus: u32,
    pub total_points: u32,
}

/// Result of recording one task completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletionReward {
    pub points_earned: u32,
    pub new_level: u32,
    pub achievements_unlocked: Vec<Achievement>,
    pub new_streak: u32,
}

/// Summary figures shown on the home screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_points: u32,
    pub level: u32,
    pub achievements_count: usize,
}

impl Default for LeaderboardStats {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            total_points: 0,
            level: 1,
            achievements_count: 0,
        }
    }
}

impl From<&UserRewards> for LeaderboardStats {
    fn from(rewards: &UserRewards) -> Self {
        Self {
            current_streak: rewards.current_streak,
            longest_streak: rewards.longest_streak,
            total_points: rewards.total_points,
            level: rewards.current_level,
            achievements_count: rewards.achievements.len(),
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Message category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    #[default]
    Motivational,
    Achievement,
    Mindfulness,
    Productivity,
}

impl MessageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCategory::Motivational => "motivational",
            MessageCategory::Achievement => "achievement",
            MessageCategory::Mindfulness => "mindfulness",
            MessageCategory::Productivity => "productivity",
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "motivational" => Ok(MessageCategory::Motivational),
            "achievement" => Ok(MessageCategory::Achievement),
            "mindfulness" => Ok(MessageCategory::Mindfulness),
            "productivity" => Ok(MessageCategory::Productivity),
            _ => Err(ModelError::UnknownCategory(s.to_string())),
        }
    }
}

/// Emotional tone of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageMood {
    #[default]
    Energetic,
    Calm,
    Focused,
    Grateful,
}

impl MessageMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageMood::Energetic => "energetic",
            MessageMood::Calm => "calm",
            MessageMood::Focused => "focused",
            MessageMood::Grateful => "grateful",
        }
    }
}

impl fmt::Display for MessageMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageMood {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "energetic" => Ok(MessageMood::Energetic),
            "calm" => Ok(MessageMood::Calm),
            "focused" => Ok(MessageMood::Focused),
            "grateful" => Ok(MessageMood::Grateful),
            _ => Err(ModelError::UnknownMood(s.to_string())),
        }
    }
}

/// Rough length bucket of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl MessageLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageLength::Short => "short",
            MessageLength::Medium => "medium",
            MessageLength::Long => "long",
        }
    }
}

impl fmt::Display for MessageLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageLength {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(MessageLength::Short),
            "medium" => Ok(MessageLength::Medium),
            "long" => Ok(MessageLength::Long),
            _ => Err(ModelError::UnknownLength(s.to_string())),
        }
    }
}

/// Catalog message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub category: MessageCategory,
    pub mood: MessageMood,
    pub length: MessageLength,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog entry before the store assigns an id and timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub text: String,
    pub category: MessageCategory,
    pub mood: MessageMood,
    pub length: MessageLength,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_preferred_categories() -> Vec<MessageCategory> {
    vec![MessageCategory::Motivational]
}

/// Message preferences stored on the user record
///
/// Each field falls back to its own default when absent from the stored
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessagePreferences {
    #[serde(default = "default_preferred_categories")]
    pub preferred_categories: Vec<MessageCategory>,
    #[serde(default)]
    pub preferred_mood: MessageMood,
    #[serde(default)]
    pub preferred_length: MessageLength,
    #[serde(default)]
    pub excluded_tags: Vec<String>,
    /// Recently delivered message ids, oldest first
    #[serde(default)]
    pub last_message_ids: Vec<Uuid>,
}

impl Default for UserMessagePreferences {
    fn default() -> Self {
        Self {
            preferred_categories: default_preferred_categories(),
            preferred_mood: MessageMood::default(),
            preferred_length: MessageLength::default(),
            excluded_tags: Vec::new(),
            last_message_ids: Vec::new(),
        }
    }
}

/// Partial preference update; only the fields present are merged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePreferencesUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_categories: Option<Vec<MessageCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_mood: Option<MessageMood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_length: Option<MessageLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_tags: Option<Vec<String>>,
}

impl MessagePreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        self.preferred_categories.is_none()
            && self.preferred_mood.is_none()
            && self.preferred_length.is_none()
            && self.excluded_tags.is_none()
    }

    /// Apply the present fields onto existing preferences
    pub fn apply_to(&self, prefs: &mut UserMessagePreferences) {
        if let Some(ref categories) = self.preferred_categories {
            prefs.preferred_categories = categories.clone();
        }
        if let Some(mood) = self.preferred_mood {
            prefs.preferred_mood = mood;
        }
        if let Some(length) = self.preferred_length {
            prefs.preferred_length = length;
        }
        if let Some(ref tags) = self.excluded_tags {
            prefs.excluded_tags = tags.clone();
        }
    }
}

// ============================================================================
// Morning tasks
// ============================================================================

/// The task a user picked for one morning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorningTask {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_custom: bool,
}

/// Task counters for the home screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: u32,
    pub completed: u32,
    pub streak: u32,
}

// ============================================================================
// Onboarding
// ============================================================================

fn enabled() -> bool {
    true
}

/// Notification toggles chosen during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default = "enabled")]
    pub daily_reminders: bool,
    #[serde(default = "enabled")]
    pub weekly_reports: bool,
    #[serde(default = "enabled")]
    pub achievement_alerts: bool,
    #[serde(default)]
    pub marketing_emails: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            daily_reminders: true,
            weekly_reports: true,
            achievement_alerts: true,
            marketing_emails: false,
        }
    }
}

/// User profile with onboarding state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub wake_time: Option<NaiveTime>,
    pub notification_preferences: NotificationPreferences,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
}
