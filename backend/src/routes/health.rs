//! Health endpoints: `/health`, `/health/ready` (database reachable) and
//! `/health/live`

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy".to_string(),
                message: None,
            },
            Err(e) => Self {
                status: "unhealthy".to_string(),
                message: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: version(),
        checks: None,
    })
}

/// 503 while the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = CheckStatus::from_result(db::health_check(state.db()).await);
    let is_healthy = db_check.is_healthy();

    let response = HealthResponse {
        status: if is_healthy { "ready" } else { "not_ready" }.to_string(),
        version: version(),
        checks: Some(HealthChecks { database: db_check }),
    };

    if is_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        version: version(),
        checks: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[test]
    fn test_check_status_from_result() {
        assert!(CheckStatus::from_result(Ok::<(), String>(())).is_healthy());
        let failed = CheckStatus::from_result(Err("connection refused"));
        assert!(!failed.is_healthy());
        assert_eq!(failed.message.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }
}
