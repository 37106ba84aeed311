//! Account signup and login for corkboard.

use tracing::{debug, info};

use crate::auth::validation::{validate_email, validate_username};
use crate::auth::{hash_password, validate_password, verify_password, PasswordError};
use crate::db::{NewUser, Role, User, UserRepository};
use crate::{BoardError, Result};

/// Signup request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username (3-20 alphanumeric + underscore).
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password (8-128 characters).
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Run a password hash or verify off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, PasswordError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BoardError::Password(PasswordError::HashError(e.to_string())))?
        .map_err(BoardError::from)
}

/// Register a new user with the USER role.
///
/// Fields are validated first, then the username and email are checked for
/// duplicates (in that order), then the password is hashed with Argon2id.
pub async fn register(repo: &UserRepository<'_>, request: RegistrationRequest) -> Result<User> {
    register_with_role(repo, request, Role::User).await
}

/// Register a new user with a specific role.
///
/// Used to provision administrators; the HTTP signup always uses USER.
pub async fn register_with_role(
    repo: &UserRepository<'_>,
    request: RegistrationRequest,
    role: Role,
) -> Result<User> {
    validate_username(&request.username)?;
    validate_email(&request.email)?;
    validate_password(&request.password).map_err(|e| BoardError::Validation(e.to_string()))?;

    if repo.exists_by_username(&request.username).await? {
        return Err(BoardError::Conflict("username already exists".to_string()));
    }
    if repo.exists_by_email(&request.email).await? {
        return Err(BoardError::Conflict("email already exists".to_string()));
    }

    let password = request.password;
    let password_hash = run_blocking(move || hash_password(&password)).await?;

    let new_user =
        NewUser::new(&request.username, &request.email, password_hash).with_role(role);
    let user = repo.create(&new_user).await?;

    info!(
        username = %user.username,
        user_id = user.id,
        role = %role,
        "New user registered"
    );

    Ok(user)
}

/// Check a username and password.
///
/// An unknown username and a wrong password both yield
/// `BoardError::BadCredentials`.
pub async fn authenticate(
    repo: &UserRepository<'_>,
    username: &str,
    password: &str,
) -> Result<User> {
    let user = match repo.get_by_username(username).await? {
        Some(user) => user,
        None => {
            debug!(username, "Login for unknown user");
            return Err(BoardError::BadCredentials);
        }
    };

    let candidate = password.to_string();
    let stored = user.password.clone();
    match run_blocking(move || verify_password(&candidate, &stored)).await {
        Ok(()) => {
            info!(username = %user.username, user_id = user.id, "User logged in");
            Ok(user)
        }
        Err(BoardError::Password(PasswordError::VerificationFailed)) => {
            debug!(username = %user.username, "Login with wrong password");
            Err(BoardError::BadCredentials)
        }
        Err(e) => Err(e),
    }
}
