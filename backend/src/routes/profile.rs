//! Profile and onboarding routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use sparkvibe_shared::models::UserProfile;
use sparkvibe_shared::types::{OnboardingRequest, WakeTimeRequest};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/onboarding", put(complete_onboarding))
        .route("/wake-time", put(update_wake_time))
}

/// GET /api/v1/profile
async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserProfile>> {
    let profile = ProfileService::get_profile(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile/onboarding
async fn complete_onboarding(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<OnboardingRequest>,
) -> ApiResult<Json<UserProfile>> {
    let profile = ProfileService::complete_onboarding(state.db(), auth.user_id, req).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile/wake-time
async fn update_wake_time(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<WakeTimeRequest>,
) -> ApiResult<Json<UserProfile>> {
    let profile = ProfileService::update_wake_time(state.db(), auth.user_id, &req.wake_time).await?;
    Ok(Json(profile))
}
