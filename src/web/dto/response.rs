//! Response DTOs for the corkboard HTTP API.
//!
//! Bodies are camelCase and returned without an envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::board::{Comment, Page, Post};
use crate::db::User;

/// Returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// Username the token was issued for.
    pub username: String,
    /// Email address.
    pub email: String,
}

impl AuthResponse {
    /// Pair a freshly issued token with the user it belongs to.
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// User profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address, omitted from public profiles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// User role (ADMIN or USER).
    pub role: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    /// Full profile, for the user themselves and administrators.
    pub fn private(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: Some(user.email),
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }

    /// Profile without contact details.
    pub fn public(user: User) -> Self {
        Self {
            email: None,
            ..Self::private(user)
        }
    }
}

/// Post.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// Post ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Author's username.
    pub author_username: String,
    /// Number of reads.
    pub view_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_username: post.author_username,
            view_count: post.view_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Comment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Comment ID.
    pub id: i64,
    /// Body.
    pub content: String,
    /// Author's username.
    pub author_username: String,
    /// Post the comment belongs to.
    pub post_id: i64,
    /// Comment this one replies to, null for top-level comments.
    pub parent_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            author_username: comment.author_username,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            created_at: comment.created_at,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    /// Items in this page.
    pub content: Vec<T>,
    /// Zero-based page number.
    pub number: u32,
    /// Page size.
    pub size: u32,
    /// Total number of items.
    pub total_elements: i64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T: Serialize> PageResponse<T> {
    /// Convert a service page, mapping each item.
    pub fn from_page<U>(page: Page<U>) -> Self
    where
        T: From<U>,
    {
        let page = page.map(T::from);
        Self {
            content: page.content,
            number: page.number,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }
}
