//! Board module for corkboard.
//!
//! This module provides the discussion board itself:
//! - Posts with keyword search and view counting
//! - Comments with one level of replies
//! - The board service that applies ownership checks

mod comment;
mod comment_repository;
mod post;
mod post_repository;
mod service;

pub use comment::{Comment, NewComment, ReplyPolicy};
pub use comment_repository::CommentRepository;
pub use post::{NewPost, Post, PostUpdate};
pub use post_repository::{PostRepository, SearchFilter};
pub use service::{
    BoardService, Page, PageRequest, MAX_COMMENT_LENGTH, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH,
};
