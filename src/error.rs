//! Error types for corkboard.

use thiserror::Error;

/// Common error type for corkboard.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A protected action was attempted without a usable identity.
    #[error("authentication required")]
    Unauthenticated,

    /// The caller is authenticated but may not touch the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The request clashes with existing state (duplicate username, a
    /// comment that still has replies, ...).
    #[error("{0}")]
    Conflict(String),

    /// Bearer token failed signature, structure or expiry checks.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Token could not be signed.
    #[error("token error: {0}")]
    Token(String),

    /// Login failed (unknown user or wrong password).
    #[error("invalid username or password")]
    BadCredentials,

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Password hashing failure.
    #[error("password error: {0}")]
    Password(#[from] crate::auth::PasswordError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        BoardError::Database(e.to_string())
    }
}

/// Result type alias for corkboard operations.
pub type Result<T> = std::result::Result<T, BoardError>;
