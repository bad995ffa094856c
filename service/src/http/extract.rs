//! Extractors whose rejections flow into [`AppError`].
//!
//! axum's own `Json` and `Query` reject with plain-text bodies; these wrappers
//! forward the rejection to the centralized error handler instead, so a
//! malformed body fails fast with the standard 400 envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query-string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
