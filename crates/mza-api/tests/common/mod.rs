use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mza_api::config::Environment;
use mza_api::progress::{CoalescingProgressSink, InMemoryProgressStore, ProgressStore};
use mza_api::state::ApiState;
use tower::ServiceExt;

/// A router wired to an observable in-memory progress store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryProgressStore>,
}

/// Build a test app with a fast progress flush interval. Must run inside
/// a tokio runtime (the sink spawns its flush task).
pub fn test_app() -> TestApp {
    let store = Arc::new(InMemoryProgressStore::default());
    let store_dyn: Arc<dyn ProgressStore> = store.clone();
    let sink = CoalescingProgressSink::spawn(store_dyn, Duration::from_millis(10));
    let state = ApiState::with_sink(Environment::Development, Arc::new(sink));
    let router = mza_api::router::router().with_state(state);
    TestApp { router, store }
}

/// POST a JSON body and decode the JSON response (Null when empty).
pub async fn post_json(
    router: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("failed to execute request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[allow(dead_code)]
pub async fn get(router: &Router, path: &str) -> StatusCode {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request");

    router
        .clone()
        .oneshot(request)
        .await
        .expect("failed to execute request")
        .status()
}
