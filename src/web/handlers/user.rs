//! User profile handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::auth::UserDirectory;
use crate::web::dto::UserResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthUser, MaybeIdentity};

/// GET /api/users/me - Current user's profile.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserDirectory::new(&state.db)
        .current_user(Some(&identity))
        .await?;

    Ok(Json(UserResponse::private(user)))
}

/// GET /api/users - List all users (admin only).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    MaybeIdentity(identity): MaybeIdentity,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserDirectory::new(&state.db)
        .list(identity.as_ref())
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::private).collect()))
}

/// GET /api/users/:id - Public profile.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserDirectory::new(&state.db).get(user_id).await?;

    Ok(Json(UserResponse::public(user)))
}

/// DELETE /api/users/:id - Delete a user and everything they wrote (admin only).
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    MaybeIdentity(identity): MaybeIdentity,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    UserDirectory::new(&state.db)
        .delete(identity.as_ref(), user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
