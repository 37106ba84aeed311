//! Test helpers for the HTTP API tests.
//!
//! Builds an in-memory application behind an axum-test `TestServer` and
//! provides shortcuts for the usual signup and posting steps.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use serde_json::{json, Value};

use corkboard::config::BoardConfig;
use corkboard::web::handlers::AppState;
use corkboard::web::middleware::RateLimitState;
use corkboard::web::router::{create_health_router, create_router};
use corkboard::{register_with_role, Database, RegistrationRequest, Role, TokenService, UserRepository};

/// Secret used to sign tokens in tests.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Password used for every test account.
pub const TEST_PASSWORD: &str = "password123";

/// A running test application.
pub struct TestApp {
    /// HTTP test server.
    pub server: TestServer,
    /// Database shared with the server.
    pub db: Database,
}

/// Create a test application with default board settings.
pub async fn create_test_app() -> TestApp {
    create_test_app_with(BoardConfig::default(), 100).await
}

/// Create a test application with custom board settings and login limit.
pub async fn create_test_app_with(board: BoardConfig, login_rate_limit: u32) -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let tokens = Arc::new(TokenService::new(TEST_SECRET, 3600));
    let app_state = Arc::new(AppState::new(db.clone(), tokens, board));
    let rate_limit = Arc::new(RateLimitState::new(login_rate_limit, false));

    let router = create_router(app_state, &[], rate_limit).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, db }
}

/// Bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Sign up a user through the API and return their token.
pub async fn signup(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": TEST_PASSWORD
        }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .expect("token in signup response")
        .to_string()
}

/// Log in through the API and return the token.
pub async fn login(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": username, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

/// Provision an administrator directly and return their token.
pub async fn create_admin(app: &TestApp, username: &str) -> String {
    let repo = UserRepository::new(app.db.pool());
    register_with_role(
        &repo,
        RegistrationRequest::new(username, format!("{}@example.com", username), TEST_PASSWORD),
        Role::Admin,
    )
    .await
    .expect("Failed to create admin");

    login(&app.server, username).await
}

/// Fetch the caller's own profile.
pub async fn me(server: &TestServer, token: &str) -> Value {
    let response = server
        .get("/api/users/me")
        .add_header(AUTHORIZATION, bearer(token))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Create a post and return its body.
pub async fn create_post(server: &TestServer, token: &str, title: &str, content: &str) -> Value {
    let response = server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({ "title": title, "content": content }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Create a comment (or reply) and return its body.
pub async fn create_comment(
    server: &TestServer,
    token: &str,
    post_id: i64,
    content: &str,
    parent_id: Option<i64>,
) -> Value {
    let response = server
        .post(&format!("/api/posts/{}/comments", post_id))
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({ "content": content, "parentId": parent_id }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}
