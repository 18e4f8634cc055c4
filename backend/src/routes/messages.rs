//! Personalized message routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sparkvibe_shared::models::{
    Message, MessagePreferencesUpdate, NewMessage, UserMessagePreferences,
};
use sparkvibe_shared::types::{
    CreateMessageRequest, PersonalizedMessageResponse, SeedMessagesResponse,
};

pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(add_message))
        .route("/personalized", get(get_personalized))
        .route("/seed", post(seed_messages))
        .route("/preferences", get(get_preferences).put(update_preferences))
}

/// GET /api/v1/messages/personalized
async fn get_personalized(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<PersonalizedMessageResponse> {
    let message = state.messages.get_personalized_message(auth.user_id).await;
    Json(PersonalizedMessageResponse { message })
}

/// POST /api/v1/messages
///
/// Open to any authenticated user; there is no admin role yet.
async fn add_message(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateMessageRequest>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    let message = state
        .messages
        .add_message(NewMessage {
            text: req.text,
            category: req.category,
            mood: req.mood,
            length: req.length,
            tags: req.tags,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /api/v1/messages/seed
async fn seed_messages(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<SeedMessagesResponse>> {
    let inserted = state.messages.seed_messages().await?;
    Ok(Json(SeedMessagesResponse { inserted }))
}

/// GET /api/v1/messages/preferences
async fn get_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<UserMessagePreferences> {
    Json(state.messages.get_preferences(auth.user_id).await)
}

/// PUT /api/v1/messages/preferences
async fn update_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(update): Json<MessagePreferencesUpdate>,
) -> ApiResult<Json<UserMessagePreferences>> {
    let prefs = state.messages.update_preferences(auth.user_id, update).await?;
    Ok(Json(prefs))
}
