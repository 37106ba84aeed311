//! Authenticated identity and ownership checks.

use crate::{BoardError, Result};

/// The caller a verified bearer token resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Username carried in the token.
    pub username: String,
}

impl Identity {
    /// Create an identity for a username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Reject anonymous callers with `Unauthenticated`.
pub fn require_identity(identity: Option<&Identity>) -> Result<&Identity> {
    identity.ok_or(BoardError::Unauthenticated)
}

/// Succeed only if `identity` is the author of the resource.
pub fn ensure_owner(identity: &Identity, author_username: &str, resource: &str) -> Result<()> {
    if identity.username == author_username {
        Ok(())
    } else {
        Err(BoardError::Forbidden(format!(
            "only the author may modify this {resource}"
        )))
    }
}
