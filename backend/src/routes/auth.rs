//! Authentication routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sparkvibe_shared::types::{
    AccountProfile, AuthTokens, LoginRequest, RefreshRequest, RegisterRequest,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/me", get(me))
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthTokens>)> {
    let tokens = UserService::register(state.db(), state.jwt(), req).await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::login(state.db(), state.jwt(), &req.email, &req.password).await?;
    Ok(Json(tokens))
}

/// POST /api/v1/auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::refresh_token(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(tokens))
}

/// GET /api/v1/auth/me
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<AccountProfile>> {
    let account = UserService::get_account(state.db(), auth.user_id).await?;
    Ok(Json(account))
}
