//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use aurora_api::state::AppState;
use aurora_store::pg_key_value_store::PgKeyValueStore;
use aurora_test_support::{RecordingNarrator, ScriptedGenerator, solar_system};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build application state over a real `PgKeyValueStore` with scripted
/// gateways.
pub async fn build_test_state(pool: PgPool, generator: ScriptedGenerator) -> AppState {
    let store = PgKeyValueStore::new(pool);
    store.ensure_schema().await.unwrap();
    AppState::new(
        solar_system(),
        Arc::new(store),
        Arc::new(generator),
        Arc::new(RecordingNarrator::new()),
    )
}

/// Build the full app router, as `main.rs` does.
pub fn build_test_app(state: &AppState) -> Router {
    aurora_api::app(state.clone())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
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
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}
