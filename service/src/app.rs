//! Composition root: assembles routes, middleware and the catalog store.

use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::catalog::CatalogStore;
use crate::error::handle_panic;
use crate::http::{request_logger, require_api_key, ApiKeyGate};
use crate::rest;

/// Build the application router.
///
/// Layer order, outermost first:
/// 1. Request logger
/// 2. Panic catcher (panics become the 500 error envelope)
/// 3. Store extension
/// 4. API key gate on every path under `/api/products`, matched or not
#[must_use]
pub fn build_app(store: Arc<dyn CatalogStore>, gate: ApiKeyGate) -> Router {
    let products =
        rest::product_routes().layer(middleware::from_fn_with_state(gate, require_api_key));

    Router::new()
        .route("/", get(rest::root))
        .route("/health", get(rest::health_check))
        .nest("/api/products", products)
        .method_not_allowed_fallback(rest::method_not_allowed)
        .fallback(rest::route_not_found)
        .layer(Extension(store))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_logger))
}
