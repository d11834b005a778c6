//! Shared helpers for the router tests.
//!
//! The router is built around a [`MemorySink`] so every emission a request
//! causes can be counted, and driven in-process with `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use codemetal_logger_service::{app, Config, MemorySink};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Router with default configuration and a fresh recording sink.
pub fn test_app() -> (Router, Arc<MemorySink>) {
    test_app_with(Config::default())
}

/// Router with the given configuration and a fresh recording sink.
pub fn test_app_with(config: Config) -> (Router, Arc<MemorySink>) {
    // ---
    let sink = Arc::new(MemorySink::new());
    let router = app(Arc::new(config), sink.clone());
    (router, sink)
}

/// Response of a GET request, with the body collected as text.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// Send `GET uri` through a clone of `app`.
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    // ---
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
