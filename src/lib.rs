//! CourseGate - content-unlocking service for the course-delivery platform
//!
//! Decides whether a learner can open a lesson or module right now, and if
//! not, why. The decision logic lives in `coursegate-rules`; this crate loads
//! the inputs from PostgreSQL and serves the verdicts over HTTP.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Orchestration of the rule engine
//! - **Store**: Read access traits, backed by the repositories
//! - **Repositories**: Database access
//! - **Models**: Database rows and their conversion into engine inputs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
