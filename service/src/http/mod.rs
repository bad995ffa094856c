//! HTTP middleware and extractors.
//!
//! Pipeline order, outermost first:
//! logging → panic catcher → (product routes only) API key gate → body/query
//! extractors → handler.

pub mod auth;
pub mod extract;
pub mod logging;

pub use auth::{require_api_key, ApiKeyGate};
pub use extract::{ApiQuery, JsonBody};
pub use logging::request_logger;
