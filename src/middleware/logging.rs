//! Request logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{info, warn};

/// Log method, path, status and latency of every request.
///
/// Availability endpoints answer locked lessons with 200, so only genuine
/// failures show up as warnings.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match status {
        s if s.is_server_error() => warn!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        ),
        s if s.is_client_error() && s != StatusCode::NOT_FOUND => warn!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request rejected"
        ),
        s => info!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}
