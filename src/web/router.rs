//! Router configuration for the corkboard HTTP API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_comment, create_post, delete_comment, delete_post, delete_user, get_post, get_user,
    list_comments, list_posts, list_users, login, me, signup, update_post, AppState,
};
use super::middleware::{bearer_gate, create_cors_layer, login_rate_limit, RateLimitState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    cors_origins: &[String],
    rate_limit: Arc<RateLimitState>,
) -> Router {
    // Only login attempts are throttled
    let login_routes = Router::new()
        .route("/login", post(login))
        .route_layer(middleware::from_fn(move |req, next| {
            let state = rate_limit.clone();
            login_rate_limit(state, req, next)
        }));

    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .merge(login_routes);

    let post_routes = Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/:post_id/comments", get(list_comments).post(create_comment))
        .route("/:post_id/comments/:comment_id", delete(delete_comment));

    let user_routes = Router::new()
        .route("/", get(list_users))
        .route("/me", get(me))
        .route("/:id", get(get_user).delete(delete_user));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/posts", post_routes)
        .nest("/users", user_routes);

    let tokens = app_state.tokens.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let tokens = tokens.clone();
                    bearer_gate(tokens, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
