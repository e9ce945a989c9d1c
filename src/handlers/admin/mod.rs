//! Curator and administrator handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

/// Admin routes (staff only)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/modules/{id}/access", get(handler::get_module_access))
        .route("/modules/{id}/parent", put(handler::update_module_parent))
}
