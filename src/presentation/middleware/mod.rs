//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, optional_auth_middleware, AuthUser, Claims};
pub use cors::create_cors_layer;
