//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{auth_middleware, require_staff, AuthenticatedUser};
pub use logging::logging_middleware;
