//! Request logging middleware.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use chrono::Utc;

/// Log every inbound request, then hand it to the rest of the pipeline.
///
/// Installed as the outermost layer so short-circuited requests (for example
/// a 401 from [`super::auth::require_api_key`]) are logged too.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    tracing::info!(
        timestamp = %Utc::now().to_rfc3339(),
        method = %method,
        path = %path,
        "incoming request"
    );

    let started = Instant::now();
    let response = next.run(request).await;

    tracing::debug!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "request completed"
    );
    response
}
