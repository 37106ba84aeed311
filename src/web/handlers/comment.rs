//! Comment handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::BoardService;
use crate::web::dto::{CommentRequest, CommentResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthUser, MaybeIdentity};

/// GET /api/posts/:post_id/comments - List a post's comments oldest first.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let comments = BoardService::new(&state.db, &state.board)
        .list_comments(post_id)
        .await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// POST /api/posts/:post_id/comments - Comment on a post or reply to a comment.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = BoardService::new(&state.db, &state.board)
        .create_comment(Some(&identity), post_id, &req.content, req.parent_id)
        .await?;

    Ok(Json(comment.into()))
}

/// DELETE /api/posts/:post_id/comments/:comment_id - Delete a comment.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    MaybeIdentity(identity): MaybeIdentity,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    BoardService::new(&state.db, &state.board)
        .delete_comment(identity.as_ref(), post_id, comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
