//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use courtbook_api::state::AppState;
use courtbook_clock::domain::catalog::ClockTypeCatalog;
use courtbook_test_support::{MockRng, SequenceRng};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build the full app router over in-memory services with a `MockRng`.
pub fn build_test_app() -> Router {
    courtbook_api::app(AppState::in_memory(
        ClockTypeCatalog::built_in().clone(),
        Arc::new(Mutex::new(MockRng)),
    ))
}

/// Build the full app router with a custom `SequenceRng` for tests that need
/// a specific Esultare seating.
pub fn build_test_app_with_rng(rng: SequenceRng) -> Router {
    courtbook_api::app(AppState::in_memory(
        ClockTypeCatalog::built_in().clone(),
        Arc::new(Mutex::new(rng)),
    ))
}

/// Send a request and return the status with the JSON body, or `Null` for an
/// empty body.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

/// Send a DELETE request and return the response.
pub async fn delete(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, None).await
}
