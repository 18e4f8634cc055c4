//! Reward routes

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use anyhow::anyhow;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use sparkvibe_shared::models::{DailyProgress, LeaderboardStats};
use sparkvibe_shared::types::{AchievementCatalogEntry, ProgressQuery, UserRewardsResponse};

/// Longest window accepted by `/rewards/progress`
const MAX_PROGRESS_DAYS: u32 = 365;

pub fn reward_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_rewards))
        .route("/progress", get(get_progress))
        .route("/stats", get(get_stats))
        .route("/achievements", get(get_achievements))
}

/// GET /api/v1/rewards
async fn get_rewards(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserRewardsResponse>> {
    let rewards = state
        .rewards
        .get_user_rewards(auth.user_id)
        .await
        .ok_or_else(|| ApiError::Internal(anyhow!("reward record unavailable")))?;
    Ok(Json(rewards.into()))
}

/// GET /api/v1/rewards/progress?days=7
async fn get_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ProgressQuery>,
) -> ApiResult<Json<Vec<DailyProgress>>> {
    if query.days > MAX_PROGRESS_DAYS {
        return Err(ApiError::Validation(format!(
            "days must be at most {}",
            MAX_PROGRESS_DAYS
        )));
    }
    let progress = state.rewards.get_daily_progress(auth.user_id, query.days).await;
    Ok(Json(progress))
}

/// GET /api/v1/rewards/stats
async fn get_stats(State(state): State<AppState>, auth: AuthUser) -> Json<LeaderboardStats> {
    Json(state.rewards.get_leaderboard_stats(auth.user_id).await)
}

/// GET /api/v1/rewards/achievements
///
/// Full catalog with the caller's unlocks marked.
async fn get_achievements(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<Vec<AchievementCatalogEntry>> {
    let unlocked = state
        .rewards
        .get_user_rewards(auth.user_id)
        .await
        .map(|rewards| rewards.achievements)
        .unwrap_or_default();
    Json(AchievementCatalogEntry::catalog(&unlocked))
}
