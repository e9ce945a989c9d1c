//! Course outline handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Course routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/{id}/outline", get(handler::get_outline))
}
