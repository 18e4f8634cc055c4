//! Integration tests for registration, login and refresh

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_and_me() {
    let app = common::TestApp::new().await;
    let email = unique_email("register");

    let (status, tokens) = app
        .post(
            "/api/v1/auth/register",
            json!({"email": email, "password": "SunriseRoutine123"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tokens["token_type"], "Bearer");

    let token = tokens["access_token"].as_str().unwrap();
    let (status, me) = app.request("GET", "/api/v1/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;
    let body = json!({"email": unique_email("dup"), "password": "SunriseRoutine123"});

    let (status, _) = app.post("/api/v1/auth/register", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/api/v1/auth/register", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_rejects_bad_input() {
    let app = common::TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/v1/auth/register",
            json!({"email": "not-an-email", "password": "SunriseRoutine123"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/v1/auth/register",
            json!({"email": unique_email("weak"), "password": "123"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_and_refresh() {
    let app = common::TestApp::new().await;
    let email = unique_email("login");
    let password = "SunriseRoutine123";

    app.post(
        "/api/v1/auth/register",
        json!({"email": email, "password": password}),
    )
    .await;

    let (status, _) = app
        .post(
            "/api/v1/auth/login",
            json!({"email": email, "password": "wrong-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, tokens) = app
        .post(
            "/api/v1/auth/login",
            json!({"email": email, "password": password}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, refreshed) = app
        .post(
            "/api/v1/auth/refresh",
            json!({"refresh_token": tokens["refresh_token"]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!refreshed["access_token"].as_str().unwrap().is_empty());
}
