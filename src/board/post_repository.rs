//! Post repository for corkboard.
//!
//! This module provides CRUD operations, keyword search and view counting
//! for posts in the database.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::post::{NewPost, Post, PostUpdate};
use crate::db::DbPool;
use crate::{BoardError, Result};

const POST_SELECT: &str = "SELECT p.id, p.title, p.content, p.author_id,
        u.username AS author_username, p.view_count, p.created_at, p.updated_at
     FROM posts p JOIN users u ON u.id = p.author_id";

/// Keyword filter for post listings.
#[derive(Debug, Clone, Copy)]
pub struct SearchFilter<'q> {
    /// Substring to look for in the title or content.
    pub keyword: &'q str,
    /// Whether the match is case-sensitive.
    pub case_sensitive: bool,
}

impl<'q> SearchFilter<'q> {
    /// Build a filter, treating an empty or blank keyword as no filter.
    pub fn from_keyword(keyword: Option<&'q str>, case_sensitive: bool) -> Option<Self> {
        keyword
            .filter(|k| !k.trim().is_empty())
            .map(|keyword| Self {
                keyword,
                case_sensitive,
            })
    }
}

/// Lowercase text for the `*_folded` search columns.
///
/// SQLite's `lower()` only folds ASCII, so folding happens here with full
/// Unicode rules and the result is stored alongside the original.
fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

fn push_search_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: Option<&SearchFilter<'_>>) {
    let Some(filter) = filter else {
        return;
    };

    // instr() instead of LIKE: LIKE folds ASCII case and treats % and _ as wildcards.
    let (title, content, keyword) = if filter.case_sensitive {
        ("p.title", "p.content", filter.keyword.to_string())
    } else {
        ("p.title_folded", "p.content_folded", fold_case(filter.keyword))
    };

    query.push(format!(" WHERE (instr({title}, "));
    query.push_bind(keyword.clone());
    query.push(format!(") > 0 OR instr({content}, "));
    query.push_bind(keyword);
    query.push(") > 0)");
}

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (title, content, title_folded, content_folded, author_id,
                                created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(fold_case(&new_post.title))
        .bind(fold_case(&new_post.content))
        .bind(new_post.author_id)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// Get a post by ID without touching its view count.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!("{POST_SELECT} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(post)
    }

    /// Increment a post's view count and return the post with the new count.
    ///
    /// The increment is a single UPDATE, so concurrent readers never lose
    /// counts. Returns None if the post does not exist.
    pub async fn increment_view_count(&self, id: i64) -> Result<Option<Post>> {
        let view_count: Option<i64> = sqlx::query_scalar(
            "UPDATE posts SET view_count = view_count + 1 WHERE id = ? RETURNING view_count",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(view_count) = view_count else {
            return Ok(None);
        };

        Ok(self.get_by_id(id).await?.map(|mut post| {
            post.view_count = view_count;
            post
        }))
    }

    /// Update a post by ID.
    ///
    /// Only fields that are set in the update will be modified; `updated_at`
    /// is always refreshed. Returns the updated post, or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title.clone());
            separated.push("title_folded = ");
            separated.push_bind_unseparated(fold_case(title));
        }
        if let Some(ref content) = update.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content.clone());
            separated.push("content_folded = ");
            separated.push_bind_unseparated(fold_case(content));
        }
        separated.push("updated_at = ");
        separated.push_bind_unseparated(Utc::now());

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID. Its comments are removed by the foreign key.
    ///
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List posts newest first with pagination and an optional keyword filter.
    pub async fn list_paginated(
        &self,
        filter: Option<&SearchFilter<'_>>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(POST_SELECT);
        push_search_filter(&mut query, filter);
        query.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let posts = query.build_query_as::<Post>().fetch_all(self.pool).await?;
        Ok(posts)
    }

    /// Count posts matching an optional keyword filter.
    pub async fn count(&self, filter: Option<&SearchFilter<'_>>) -> Result<i64> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM posts p");
        push_search_filter(&mut query, filter);

        let count: i64 = query.build_query_scalar().fetch_one(self.pool).await?;
        Ok(count)
    }
}
