//! API handlers for the corkboard HTTP API.

pub mod auth;
pub mod comment;
pub mod post;
pub mod user;

pub use auth::*;
pub use comment::*;
pub use post::*;
pub use user::*;

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::BoardConfig;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Database,
    /// Bearer token issuer.
    pub tokens: Arc<TokenService>,
    /// Pagination, search and reply settings.
    pub board: BoardConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, tokens: Arc<TokenService>, board: BoardConfig) -> Self {
        Self { db, tokens, board }
    }
}
