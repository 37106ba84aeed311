//! Authentication handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth::{authenticate, register, RegistrationRequest};
use crate::db::{User, UserRepository};
use crate::web::dto::{AuthResponse, LoginRequest, SignupRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

fn issue_token(state: &AppState, user: &User) -> Result<AuthResponse, ApiError> {
    let token = state.tokens.issue(&user.username)?;
    Ok(AuthResponse::new(token, user))
}

/// POST /api/auth/signup - Create an account and sign in.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = register(
        &repo,
        RegistrationRequest::new(req.username, req.email, req.password),
    )
    .await?;

    Ok(Json(issue_token(&state, &user)?))
}

/// POST /api/auth/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = authenticate(&repo, &req.username, &req.password).await?;

    Ok(Json(issue_token(&state, &user)?))
}
