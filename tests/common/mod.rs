// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use edutaskmap_server::{
    handlers,
    linkmeta::{MetadataFetcher, DEFAULT_FETCH_TIMEOUT},
    state::AppState,
    store::TaskStore,
};

/// Build the full application router with a fresh in-memory store.
///
/// The router is cheap to clone; clones share the same store, so multi-step
/// scenarios can reuse one app across requests.
pub fn create_test_app() -> Router {
    let fetcher = MetadataFetcher::new(DEFAULT_FETCH_TIMEOUT).expect("Failed to build HTTP client");
    let state = AppState {
        tasks: TaskStore::new(),
        fetcher: Arc::new(fetcher),
    };
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/link-preview",
            get(handlers::link_preview::get_link_preview),
        )
        .route(
            "/classes/:class_id/tasks",
            post(handlers::tasks::create_task),
        )
        .route("/classes/:class_id/tasks", get(handlers::tasks::list_tasks))
        .with_state(state)
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// ── Scenario helpers ─────────────────────────────────────────────────────────

/// Create a task in a class and return the full response body.
pub async fn create_task(app: Router, class_id: i64, description: &str) -> Value {
    let (status, body) = post_json(
        app,
        &format!("/classes/{class_id}/tasks"),
        serde_json::json!({ "description": description }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "setup create_task failed: {body}");
    body
}
