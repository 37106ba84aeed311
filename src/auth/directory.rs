//! User directory: profile lookups and administrator account management.

use tracing::info;

use super::identity::{require_identity, Identity};
use crate::db::{Database, User, UserRepository};
use crate::{BoardError, Result};

/// Read and manage user accounts on behalf of an identity.
pub struct UserDirectory<'a> {
    db: &'a Database,
}

impl<'a> UserDirectory<'a> {
    /// Create a new UserDirectory with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Resolve the identity to its stored user.
    ///
    /// Anonymous callers and tokens naming a user that no longer exists
    /// both yield `Unauthenticated`.
    pub async fn current_user(&self, identity: Option<&Identity>) -> Result<User> {
        let identity = require_identity(identity)?;
        UserRepository::new(self.db.pool())
            .get_by_username(&identity.username)
            .await?
            .ok_or(BoardError::Unauthenticated)
    }

    /// Get a user by ID.
    pub async fn get(&self, id: i64) -> Result<User> {
        UserRepository::new(self.db.pool())
            .get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("user".to_string()))
    }

    /// List all users. Administrators only.
    pub async fn list(&self, identity: Option<&Identity>) -> Result<Vec<User>> {
        self.require_admin(identity).await?;
        UserRepository::new(self.db.pool()).list_all().await
    }

    /// Delete a user together with their posts and comments. Administrators
    /// only, and not their own account.
    pub async fn delete(&self, identity: Option<&Identity>, id: i64) -> Result<()> {
        let admin = self.require_admin(identity).await?;
        if admin.id == id {
            return Err(BoardError::Validation(
                "administrators cannot delete their own account".to_string(),
            ));
        }

        let repo = UserRepository::new(self.db.pool());
        if !repo.delete(id).await? {
            return Err(BoardError::NotFound("user".to_string()));
        }

        info!(user_id = id, admin = %admin.username, "User deleted");
        Ok(())
    }

    async fn require_admin(&self, identity: Option<&Identity>) -> Result<User> {
        let user = self.current_user(identity).await?;
        if !user.role.is_admin() {
            return Err(BoardError::Forbidden(
                "administrator role required".to_string(),
            ));
        }
        Ok(user)
    }
}
