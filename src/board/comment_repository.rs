//! Comment repository for corkboard.

use chrono::Utc;
use sqlx::SqliteConnection;

use super::comment::{Comment, NewComment, ReplyPolicy};
use crate::db::DbPool;
use crate::{BoardError, Result};

const COMMENT_SELECT: &str = "SELECT c.id, c.content, c.author_id,
        u.username AS author_username, c.post_id, c.parent_id, c.created_at
     FROM comments c JOIN users u ON u.id = c.author_id";

/// Repository for comment operations.
pub struct CommentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new comment.
    ///
    /// Parent checks (same post, top-level) are the caller's job.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (content, author_id, post_id, parent_id, created_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_comment.content)
        .bind(new_comment.author_id)
        .bind(new_comment.post_id)
        .bind(new_comment.parent_id)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!("{COMMENT_SELECT} WHERE c.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(comment)
    }

    /// List all comments of a post, oldest first. Replies are included
    /// in the same flat list.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "{COMMENT_SELECT} WHERE c.post_id = ? ORDER BY c.created_at ASC, c.id ASC"
        ))
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;
        Ok(comments)
    }

    /// Count direct replies to a comment on the given connection.
    async fn count_replies(conn: &mut SqliteConnection, id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE parent_id = ?")
            .bind(id)
            .fetch_one(conn)
            .await?;
        Ok(count)
    }

    /// Delete a comment, applying `policy` to its replies.
    ///
    /// The reply check and the delete run in one transaction. Returns true
    /// if the comment was deleted, false if not found.
    pub async fn delete(&self, id: i64, policy: ReplyPolicy) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        match policy {
            ReplyPolicy::Detach => {
                sqlx::query("UPDATE comments SET parent_id = NULL WHERE parent_id = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            ReplyPolicy::Cascade => {
                sqlx::query("DELETE FROM comments WHERE parent_id = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            ReplyPolicy::Reject => {
                let replies = Self::count_replies(&mut tx, id).await?;
                if replies > 0 {
                    tx.rollback().await?;
                    return Err(BoardError::Conflict(format!(
                        "comment has {replies} replies"
                    )));
                }
            }
        }

        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
