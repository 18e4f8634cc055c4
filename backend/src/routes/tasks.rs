//! Morning task routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::TaskService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sparkvibe_shared::models::{MorningTask, TaskStats};
use sparkvibe_shared::types::{
    CreateTaskRequest, TaskCompletionResponse, TaskHistoryQuery, TaskSuggestionsResponse,
};
use uuid::Uuid;

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/today", get(get_today).post(create_today))
        .route("/suggestions", get(get_suggestions))
        .route("/:id/complete", post(complete_task))
        .route("/history", get(get_history))
        .route("/stats", get(get_stats))
}

/// GET /api/v1/tasks/today
async fn get_today(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Option<MorningTask>>> {
    let task = state.tasks.get_todays_task(auth.user_id).await?;
    Ok(Json(task))
}

/// POST /api/v1/tasks/today
async fn create_today(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<MorningTask>)> {
    let task = state
        .tasks
        .create_todays_task(auth.user_id, &req.title, req.is_custom)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks/suggestions
async fn get_suggestions(_auth: AuthUser) -> Json<TaskSuggestionsResponse> {
    Json(TaskSuggestionsResponse {
        suggestions: TaskService::suggestions(),
    })
}

/// POST /api/v1/tasks/:id/complete
async fn complete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<TaskCompletionResponse>> {
    let completion = state.tasks.complete_task(auth.user_id, task_id).await?;
    Ok(Json(completion))
}

/// GET /api/v1/tasks/history?limit=7
async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TaskHistoryQuery>,
) -> ApiResult<Json<Vec<MorningTask>>> {
    let tasks = state.tasks.get_task_history(auth.user_id, query.limit).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/stats
async fn get_stats(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<TaskStats>> {
    let stats = state.tasks.get_task_stats(auth.user_id).await?;
    Ok(Json(stats))
}
