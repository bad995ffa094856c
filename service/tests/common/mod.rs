//! Common test utilities for integration tests.
//!
//! - [`app_builder::TestAppBuilder`] - Build test Axum apps that mirror main.rs wiring
//! - [`send`] and friends - Drive a router with `oneshot` and decode the reply
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_app() {
//!     let app = TestAppBuilder::seeded().build();
//!     let (status, json) = send_json(app, get_authed("/api/products")).await;
//! }
//! ```

#![allow(dead_code)]

pub mod app_builder;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_KEY: &str = "secret123";

/// Build a request carrying the test API key.
pub fn authed(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(API_KEY_HEADER, API_KEY);
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub fn get_authed(uri: &str) -> Request<Body> {
    authed(Method::GET, uri, None)
}

/// Send one request and return the status with the raw body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    (status, body.to_vec())
}

/// Send one request and parse the body as JSON.
pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let json = serde_json::from_slice(&body).expect("Response should be valid JSON");
    (status, json)
}

/// Assert the standard error envelope.
pub fn assert_error(json: &Value, message: &str, error_type: &str) {
    assert_eq!(json["error"]["message"], message, "body: {json}");
    assert_eq!(json["error"]["type"], error_type, "body: {json}");
}
