//! Shared-secret header gate for the product routes.
//!
//! A request passes when the configured header is present and its value
//! matches the configured secret exactly. Anything else is answered here with
//! 401 and `{"error": "..."}`; the rejection does not go through
//! [`crate::error::AppError`].

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::{AuthConfig, ConfigError};

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: invalid or missing API key";

/// Body of a 401 response
#[derive(Debug, Serialize, Deserialize)]
pub struct UnauthorizedResponse {
    pub error: String,
}

/// Header name and secret checked by [`require_api_key`].
#[derive(Debug, Clone)]
pub struct ApiKeyGate {
    header: HeaderName,
    secret: Arc<str>,
}

impl ApiKeyGate {
    #[must_use]
    pub fn new(header: HeaderName, secret: &str) -> Self {
        Self {
            header,
            secret: Arc::from(secret),
        }
    }

    /// Build the gate from the `auth` configuration section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the header name is not a valid HTTP header.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let header = HeaderName::from_bytes(config.header.as_bytes()).map_err(|_| {
            ConfigError::Validation(format!(
                "auth.header '{}' is not a valid HTTP header name",
                config.header
            ))
        })?;
        Ok(Self::new(header, &config.api_key))
    }

    fn permits(&self, headers: &HeaderMap) -> bool {
        headers
            .get(&self.header)
            .is_some_and(|value| value.as_bytes() == self.secret.as_bytes())
    }
}

/// Reject requests that do not carry the shared secret.
pub async fn require_api_key(
    State(gate): State<ApiKeyGate>,
    request: Request,
    next: Next,
) -> Response {
    if gate.permits(request.headers()) {
        return next.run(request).await;
    }

    tracing::warn!(path = %request.uri().path(), "rejected request without valid API key");
    (
        StatusCode::UNAUTHORIZED,
        Json(UnauthorizedResponse {
            error: UNAUTHORIZED_MESSAGE.to_string(),
        }),
    )
        .into_response()
}
