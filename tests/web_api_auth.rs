//! Web API Authentication Tests
//!
//! Integration tests for signup, login and bearer token handling.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use corkboard::config::BoardConfig;
use corkboard::TokenService;
use serde_json::{json, Value};

use common::{bearer, create_admin, create_test_app, create_test_app_with, signup, TEST_PASSWORD};

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signup_success() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": TEST_PASSWORD
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["token"].is_string());
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_signup_token_identifies_user() {
    let app = create_test_app().await;
    let token = signup(&app.server, "alice").await;

    let body = common::me(&app.server, &token).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "USER");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = create_test_app().await;
    signup(&app.server, "alice").await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": TEST_PASSWORD
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["message"], "username already exists");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = create_test_app().await;
    signup(&app.server, "alice").await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": TEST_PASSWORD
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "email already exists");
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "ab",
            "email": "not-an-email",
            "password": "short"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["username"].is_array());
    assert!(body["error"]["details"]["email"].is_array());
    assert!(body["error"]["details"]["password"].is_array());
}

#[tokio::test]
async fn test_signup_malformed_json() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({ "username": "alice" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let app = create_test_app().await;
    signup(&app.server, "alice").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": TEST_PASSWORD }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["token"].is_string());
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app().await;
    signup(&app.server, "alice").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrongpassword" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_unknown_user_looks_like_wrong_password() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_rate_limited() {
    let app = create_test_app_with(BoardConfig::default(), 2).await;

    for _ in 0..2 {
        app.server
            .post("/api/auth/login")
            .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "TOO_MANY_REQUESTS");

    // Signup is not throttled
    signup(&app.server, "alice").await;
}

// ============================================================================
// Bearer Token Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token() {
    let app = create_test_app().await;

    let response = app.server.get("/api/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_anonymous() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/users/me")
        .add_header(AUTHORIZATION, "Bearer invalid-token")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Public reads still work with a bad token
    app.server
        .get("/api/posts")
        .add_header(AUTHORIZATION, "Bearer invalid-token")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_foreign_token_rejected() {
    let app = create_test_app().await;
    signup(&app.server, "alice").await;

    let forged = TokenService::new("some-other-secret", 3600)
        .issue("alice")
        .unwrap();

    let response = app
        .server
        .get("/api/users/me")
        .add_header(AUTHORIZATION, bearer(&forged))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_scheme_case_insensitive() {
    let app = create_test_app().await;
    let token = signup(&app.server, "alice").await;

    let response = app
        .server
        .get("/api/users/me")
        .add_header(AUTHORIZATION, format!("bearer {}", token))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_token_of_deleted_user_cannot_write() {
    let app = create_test_app().await;
    let admin = create_admin(&app, "admin").await;
    let token = signup(&app.server, "alice").await;
    let alice_id = common::me(&app.server, &token).await["id"].as_i64().unwrap();

    app.server
        .delete(&format!("/api/users/{}", alice_id))
        .add_header(AUTHORIZATION, bearer(&admin))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = app
        .server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "title": "Ghost", "content": "Still here?" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}
