//! corkboard - a discussion board backend.
//!
//! Users sign up and log in with bearer tokens, write posts, and discuss
//! them in comments with one level of replies. Everything is served as a
//! JSON API over HTTP and stored in SQLite.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    authenticate, hash_password, register, register_with_role, verify_password, Identity,
    RegistrationRequest, TokenService, UserDirectory,
};
pub use board::{BoardService, Comment, Page, Post, ReplyPolicy};
pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository};
pub use error::{BoardError, Result};
pub use web::WebServer;
