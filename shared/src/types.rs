//! API request and response types

use crate::models::{
    Achievement, AchievementCategory, AchievementId, Message, MessageCategory, MessageLength,
    MessageMood, MorningTask, NotificationPreferences, TaskCompletionReward, UserRewards,
};
use crate::rewards::LevelProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Refresh token request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Minimal account view returned by `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Onboarding Types
// ============================================================================

/// Onboarding submission; skipped steps are left out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Wake time as `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wake_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_preferences: Option<NotificationPreferences>,
}

/// Wake time change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakeTimeRequest {
    /// Wake time as `HH:MM`
    pub wake_time: String,
}

// ============================================================================
// Reward Types
// ============================================================================

/// Reward record with level progress attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRewardsResponse {
    #[serde(flatten)]
    pub rewards: UserRewards,
    pub level_progress: LevelProgress,
}

impl From<UserRewards> for UserRewardsResponse {
    fn from(rewards: UserRewards) -> Self {
        let level_progress = crate::rewards::level_progress(rewards.total_points);
        Self {
            rewards,
            level_progress,
        }
    }
}

/// Query for `/rewards/progress`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressQuery {
    #[serde(default = "default_progress_days")]
    pub days: u32,
}

fn default_progress_days() -> u32 {
    7
}

impl Default for ProgressQuery {
    fn default() -> Self {
        Self {
            days: default_progress_days(),
        }
    }
}

/// One entry of the achievement catalog, annotated for the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementCatalogEntry {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: AchievementCategory,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementCatalogEntry {
    /// Build the full catalog marking entries present in `unlocked`
    pub fn catalog(unlocked: &[Achievement]) -> Vec<Self> {
        AchievementId::ALL
            .iter()
            .map(|id| {
                let def = id.definition();
                let earned = unlocked.iter().find(|a| a.id == *id);
                Self {
                    id: *id,
                    name: def.name.to_string(),
                    description: def.description.to_string(),
                    icon: def.icon.to_string(),
                    category: def.category,
                    unlocked: earned.is_some(),
                    unlocked_at: earned.map(|a| a.unlocked_at),
                }
            })
            .collect()
    }
}

// ============================================================================
// Morning Task Types
// ============================================================================

/// Create today's task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub is_custom: bool,
}

/// Query for `/tasks/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskHistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: u32,
}

fn default_history_limit() -> u32 {
    7
}

impl Default for TaskHistoryQuery {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

/// Completed task together with the reward it earned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCompletionResponse {
    pub task: MorningTask,
    pub reward: TaskCompletionReward,
}

/// Suggested task titles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSuggestionsResponse {
    pub suggestions: Vec<String>,
}

// ============================================================================
// Message Types
// ============================================================================

/// Add a message to the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub text: String,
    pub category: MessageCategory,
    pub mood: MessageMood,
    pub length: MessageLength,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Personalized message, absent when the catalog is empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizedMessageResponse {
    pub message: Option<Message>,
}

/// Result of seeding the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMessagesResponse {
    pub inserted: usize,
}
