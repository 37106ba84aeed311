//! Request DTOs for the corkboard HTTP API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{not_empty_trimmed, single_line_text, username_chars};

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username.
    #[validate(
        length(min = 3, max = 20, message = "Username must be 3-20 characters"),
        custom(function = "username_chars")
    )]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create or replace a post.
#[derive(Debug, Deserialize, Validate)]
pub struct PostRequest {
    /// Post title.
    #[validate(
        custom(function = "single_line_text"),
        length(max = 200, message = "Title is too long")
    )]
    pub title: String,
    /// Post body.
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 10000, message = "Content is too long")
    )]
    pub content: String,
}

/// Create a comment, optionally replying to another one.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    /// Comment body.
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 2000, message = "Comment is too long")
    )]
    pub content: String,
    /// Comment being replied to.
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Query parameters for listing posts.
#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    /// Zero-based page number.
    pub page: Option<u32>,
    /// Items per page.
    pub size: Option<u32>,
    /// Keyword to look for in titles and content.
    pub search: Option<String>,
}
