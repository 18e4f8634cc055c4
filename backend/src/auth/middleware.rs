//! Bearer token extractor
//!
//! Every `/api/v1` handler except registration, login and refresh takes
//! an [`AuthUser`]; a missing or invalid token is the "no signed-in user"
//! case and is answered with 401 before the handler runs.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = bearer_token(parts)?;

        let user_id = app_state
            .jwt()
            .validate_access_token(token)
            .and_then(|claims| claims.user_id())
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        Ok(AuthUser { user_id })
    }
}
