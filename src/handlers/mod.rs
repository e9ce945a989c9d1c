//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod courses;
pub mod health;
pub mod lessons;

use axum::{middleware, Router};

use crate::{
    middleware::auth::{auth_middleware, require_staff},
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .nest("/lessons", lessons::routes())
        .nest("/courses", courses::routes())
        .nest(
            "/admin",
            admin::routes().route_layer(middleware::from_fn(require_staff)),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(health::routes()).merge(authenticated)
}
