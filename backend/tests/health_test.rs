//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires database"]
async fn test_health_endpoints() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get("/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_readiness_reports_database() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
}
