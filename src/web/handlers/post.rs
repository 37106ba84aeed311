//! Post handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::BoardService;
use crate::web::dto::{
    validate_body, JsonBody, PageResponse, PostListQuery, PostRequest, PostResponse,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthUser, MaybeIdentity};

/// GET /api/posts - List posts newest first.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<PageResponse<PostResponse>>, ApiError> {
    let page = BoardService::new(&state.db, &state.board)
        .list_posts(query.page, query.size, query.search.as_deref())
        .await?;

    Ok(Json(PageResponse::from_page(page)))
}

/// GET /api/posts/:id - Read a post, counting the view.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = BoardService::new(&state.db, &state.board)
        .get_post(post_id)
        .await?;

    Ok(Json(post.into()))
}

/// POST /api/posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = BoardService::new(&state.db, &state.board)
        .create_post(Some(&identity), &req.title, &req.content)
        .await?;

    Ok(Json(post.into()))
}

/// PUT /api/posts/:id - Replace a post's title and content.
///
/// Ownership is settled before the body is validated, so a non-author
/// gets 403 whatever they send.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<i64>,
    JsonBody(req): JsonBody<PostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let service = BoardService::new(&state.db, &state.board);
    service.owned_post(Some(&identity), post_id).await?;
    validate_body(&req)?;

    let post = service
        .update_post(Some(&identity), post_id, &req.title, &req.content)
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /api/posts/:id - Delete a post and its comments.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    MaybeIdentity(identity): MaybeIdentity,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    BoardService::new(&state.db, &state.board)
        .delete_post(identity.as_ref(), post_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
