//! Centralized error handling.
//!
//! Handlers and extractors return [`AppError`]; its `IntoResponse` impl is the
//! single place where a failure is logged and turned into the JSON envelope
//! `{"error": {"message": ..., "type": ...}}`.

use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{CatalogError, ProductValidationError, QueryError};

const INTERNAL_MESSAGE: &str = "Internal Server Error";
const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Discriminant used for status-code and type-name mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    MethodNotAllowed,
    Validation,
    PayloadTooLarge,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the envelope's `type` field.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::NotFound => "NotFoundError",
            Self::MethodNotAllowed => "MethodNotAllowedError",
            Self::Validation => "ValidationError",
            Self::PayloadTooLarge => "PayloadTooLargeError",
            Self::Internal => "Error",
        }
    }
}

/// A request failure, tagged by kind.
///
/// Internal errors keep their cause in `detail` for the log; the client only
/// ever sees the generic message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    detail: Option<String>,
}

impl AppError {
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MethodNotAllowed,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::PayloadTooLarge,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: INTERNAL_MESSAGE.to_string(),
            detail: Some(detail.into()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Wire representation of this error.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                message: self.message.clone(),
                error_type: self.kind.type_name().to_string(),
            },
        }
    }
}

/// Error response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Human-readable explanation
    pub message: String,
    /// Error tag such as `NotFoundError`, `ValidationError` or `Error`
    #[serde(rename = "type")]
    pub error_type: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind {
            ErrorKind::Internal => tracing::error!(
                error_type = self.kind.type_name(),
                detail = self.detail.as_deref().unwrap_or_default(),
                "request failed"
            ),
            ErrorKind::NotFound
            | ErrorKind::MethodNotAllowed
            | ErrorKind::Validation
            | ErrorKind::PayloadTooLarge => tracing::warn!(
                error_type = self.kind.type_name(),
                message = %self.message,
                "request rejected"
            ),
        }

        (self.status(), Json(self.body())).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => Self::not_found("Product not found"),
            CatalogError::Unavailable => Self::internal(err.to_string()),
        }
    }
}

impl From<ProductValidationError> for AppError {
    fn from(err: ProductValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Body-limit failures keep their 413; every other rejection is a bad request.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::payload_too_large(PAYLOAD_TOO_LARGE_MESSAGE);
        }
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

/// Convert a caught handler panic into the internal-error envelope.
///
/// Installed through `tower_http::catch_panic::CatchPanicLayer::custom`.
#[allow(clippy::needless_pass_by_value)] // signature fixed by `ResponseForPanic`
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::internal(format!("handler panicked: {detail}")).into_response()
}
