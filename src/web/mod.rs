//! HTTP JSON API for corkboard.
//!
//! Routes live under `/api`; a bearer token in the `Authorization` header
//! identifies the caller.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
