//! Board service for corkboard.
//!
//! This module provides the post and comment operations with ownership
//! checks and pagination. The caller's identity is always passed in
//! explicitly; reads need none.

use tracing::info;

use crate::auth::{ensure_owner, require_identity, Identity, UserDirectory};
use crate::config::BoardConfig;
use crate::db::Database;
use crate::{BoardError, Result};

use super::comment::{Comment, NewComment};
use super::comment_repository::CommentRepository;
use super::post::{NewPost, Post, PostUpdate};
use super::post_repository::{PostRepository, SearchFilter};

/// Maximum length for post titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for post content (in characters).
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Maximum length for comments (in characters).
pub const MAX_COMMENT_LENGTH: usize = 2_000;

fn validate_text(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BoardError::Validation(format!("{field} must not be blank")));
    }
    if value.chars().count() > max {
        return Err(BoardError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Requested page of a listing, already clamped to the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: u32,
    /// Items per page.
    pub size: u32,
}

impl PageRequest {
    /// Resolve client-supplied paging against the board configuration.
    ///
    /// A missing page means 0; a missing size means the default size; the
    /// size is clamped to `1..=max_page_size`.
    pub fn resolve(page: Option<u32>, size: Option<u32>, config: &BoardConfig) -> Self {
        let max = config.max_page_size.max(1);
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(config.default_page_size).clamp(1, max),
        }
    }

    fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of a listing with its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub content: Vec<T>,
    /// Zero-based page number.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
    /// Total number of items across all pages.
    pub total_elements: i64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Build a page from its items, the request and the total count.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let size = i64::from(request.size.max(1));
        let total_pages = (total_elements.max(0) + size - 1) / size;
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    /// Convert the items while keeping the metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// Service for post and comment operations.
pub struct BoardService<'a> {
    db: &'a Database,
    config: &'a BoardConfig,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService.
    pub fn new(db: &'a Database, config: &'a BoardConfig) -> Self {
        Self { db, config }
    }

    // ========== Posts ==========

    /// List posts newest first, optionally filtered by a keyword found in
    /// the title or content.
    pub async fn list_posts(
        &self,
        page: Option<u32>,
        size: Option<u32>,
        search: Option<&str>,
    ) -> Result<Page<Post>> {
        let request = PageRequest::resolve(page, size, self.config);
        let filter = SearchFilter::from_keyword(search, self.config.search_case_sensitive);

        let repo = PostRepository::new(self.db.pool());
        let total = repo.count(filter.as_ref()).await?;
        let items = repo
            .list_paginated(filter.as_ref(), request.offset(), request.limit())
            .await?;

        Ok(Page::new(items, request, total))
    }

    /// Read a post. Every read counts as a view.
    pub async fn get_post(&self, post_id: i64) -> Result<Post> {
        PostRepository::new(self.db.pool())
            .increment_view_count(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// Create a post authored by the caller.
    pub async fn create_post(
        &self,
        identity: Option<&Identity>,
        title: &str,
        content: &str,
    ) -> Result<Post> {
        let author = UserDirectory::new(self.db).current_user(identity).await?;
        validate_text("title", title, MAX_TITLE_LENGTH)?;
        validate_text("content", content, MAX_CONTENT_LENGTH)?;

        let post = PostRepository::new(self.db.pool())
            .create(&NewPost::new(author.id, title, content))
            .await?;

        info!(post_id = post.id, author = %author.username, "Post created");
        Ok(post)
    }

    /// Replace a post's title and content. Author only.
    pub async fn update_post(
        &self,
        identity: Option<&Identity>,
        post_id: i64,
        title: &str,
        content: &str,
    ) -> Result<Post> {
        self.owned_post(identity, post_id).await?;
        validate_text("title", title, MAX_TITLE_LENGTH)?;
        validate_text("content", content, MAX_CONTENT_LENGTH)?;

        let update = PostUpdate::new().title(title).content(content);
        let post = PostRepository::new(self.db.pool())
            .update(post_id, &update)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;

        info!(post_id, author = %post.author_username, "Post updated");
        Ok(post)
    }

    /// Delete a post and its comments. Author only.
    pub async fn delete_post(&self, identity: Option<&Identity>, post_id: i64) -> Result<()> {
        let post = self.owned_post(identity, post_id).await?;

        if !PostRepository::new(self.db.pool()).delete(post_id).await? {
            return Err(BoardError::NotFound("post".to_string()));
        }

        info!(post_id, author = %post.author_username, "Post deleted");
        Ok(())
    }

    /// Load a post the caller is allowed to modify.
    ///
    /// Fails with `Unauthenticated` for anonymous callers, `NotFound` for a
    /// missing post and `Forbidden` when the caller is not the author.
    pub async fn owned_post(&self, identity: Option<&Identity>, post_id: i64) -> Result<Post> {
        let identity = require_identity(identity)?;
        let post = self.require_post(post_id).await?;
        ensure_owner(identity, &post.author_username, "post")?;
        Ok(post)
    }

    // ========== Comments ==========

    /// List a post's comments oldest first, replies included.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.require_post(post_id).await?;
        CommentRepository::new(self.db.pool())
            .list_by_post(post_id)
            .await
    }

    /// Comment on a post, or reply to a top-level comment of the same post.
    pub async fn create_comment(
        &self,
        identity: Option<&Identity>,
        post_id: i64,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<Comment> {
        let author = UserDirectory::new(self.db).current_user(identity).await?;
        self.require_post(post_id).await?;
        validate_text("content", content, MAX_COMMENT_LENGTH)?;

        let repo = CommentRepository::new(self.db.pool());
        let mut new_comment = NewComment::new(post_id, author.id, content);

        if let Some(parent_id) = parent_id {
            let parent = repo
                .get_by_id(parent_id)
                .await?
                .ok_or_else(|| BoardError::NotFound("parent comment".to_string()))?;
            if parent.post_id != post_id {
                return Err(BoardError::Validation(
                    "parent comment belongs to another post".to_string(),
                ));
            }
            if parent.is_reply() {
                return Err(BoardError::Validation(
                    "replies cannot be nested".to_string(),
                ));
            }
            new_comment = new_comment.reply_to(parent_id);
        }

        let comment = repo.create(&new_comment).await?;
        info!(
            comment_id = comment.id,
            post_id,
            parent_id = ?comment.parent_id,
            author = %author.username,
            "Comment created"
        );
        Ok(comment)
    }

    /// Delete a comment. Author only; replies follow the configured policy.
    pub async fn delete_comment(
        &self,
        identity: Option<&Identity>,
        post_id: i64,
        comment_id: i64,
    ) -> Result<()> {
        let identity = require_identity(identity)?;
        let repo = CommentRepository::new(self.db.pool());
        let comment = repo
            .get_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))?;
        ensure_owner(identity, &comment.author_username, "comment")?;

        if !repo.delete(comment_id, self.config.reply_policy).await? {
            return Err(BoardError::NotFound("comment".to_string()));
        }

        info!(
            comment_id,
            post_id,
            policy = ?self.config.reply_policy,
            author = %identity.username,
            "Comment deleted"
        );
        Ok(())
    }

    async fn require_post(&self, post_id: i64) -> Result<Post> {
        PostRepository::new(self.db.pool())
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }
}
