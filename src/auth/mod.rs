//! Authentication module for corkboard.
//!
//! This module provides password hashing, bearer tokens, account
//! registration and the identity and ownership checks used by the board.

mod directory;
mod identity;
mod password;
mod registration;
mod token;
pub mod validation;

pub use directory::UserDirectory;
pub use identity::{ensure_owner, require_identity, Identity};
pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use registration::{authenticate, register, register_with_role, RegistrationRequest};
pub use token::{Claims, TokenService};
pub use validation::ValidationError;
