//! Comment model for corkboard.
//!
//! Comments belong to a post and may reply to one top-level comment of the
//! same post through `parent_id`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Comment entity with its author's username resolved.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// Comment body.
    pub content: String,
    /// ID of the user who wrote the comment.
    pub author_id: i64,
    /// Username of the author.
    pub author_username: String,
    /// ID of the post the comment belongs to.
    pub post_id: i64,
    /// ID of the comment this one replies to.
    pub parent_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Check if this comment is a reply.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// ID of the post to comment on.
    pub post_id: i64,
    /// ID of the user writing the comment.
    pub author_id: i64,
    /// Comment body.
    pub content: String,
    /// Comment being replied to.
    pub parent_id: Option<i64>,
}

impl NewComment {
    /// Create a new top-level comment.
    pub fn new(post_id: i64, author_id: i64, content: impl Into<String>) -> Self {
        Self {
            post_id,
            author_id,
            content: content.into(),
            parent_id: None,
        }
    }

    /// Make this comment a reply to `parent_id`.
    pub fn reply_to(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// What happens to replies when their parent comment is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyPolicy {
    /// Replies survive as top-level comments.
    #[default]
    Detach,
    /// Replies are deleted with their parent.
    Cascade,
    /// Deleting a comment that has replies fails.
    Reject,
}
