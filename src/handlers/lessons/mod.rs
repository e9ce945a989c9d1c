//! Lesson availability handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Lesson routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/availability", get(handler::get_availability))
        .route("/{id}/prerequisites", get(handler::get_prerequisites))
        .route("/{id}/homework/eligibility", get(handler::get_homework_eligibility))
}
