//! Route definitions for the SparkVibe API

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod messages;
mod profile;
mod rewards;
mod tasks;

#[cfg(test)]
mod habit_routes_tests;

pub use auth::auth_routes;
pub use messages::message_routes;
pub use profile::profile_routes;
pub use rewards::reward_routes;
pub use tasks::task_routes;

/// Build the application router with its middleware stack
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "SparkVibe API v1" }))
        .nest("/auth", auth_routes())
        .nest("/profile", profile_routes())
        .nest("/rewards", reward_routes())
        .nest("/tasks", task_routes())
        .nest("/messages", message_routes())
}
