//! Prometheus metrics for monitoring API performance and health.

use std::sync::LazyLock;
use std::time::Instant;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

/// Initialize the Prometheus metrics exporter.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        &[
            0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ],
    )?;

    let handle = builder.install_recorder()?;
    Ok(handle)
}

/// Middleware recording per-request counters and duration histograms.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response: Response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Normalize URL paths to keep metric cardinality low: UUIDs and numeric
/// segments become placeholders.
fn normalize_path(path: &str) -> String {
    static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
            .expect("valid uuid regex")
    });
    static NUMBER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"/\d+").expect("valid number regex"));

    let normalized = UUID_RE.replace_all(path, ":id");
    NUMBER_RE.replace_all(&normalized, "/:id").into_owned()
}

/// Handler for the /metrics endpoint.
pub async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record one graded submission.
pub fn record_evaluation(score: u8, correct: bool) {
    counter!(
        "evaluations_total",
        "score" => score.to_string(),
        "correct" => correct.to_string()
    )
    .increment(1);
}

/// Record one served hint.
pub fn record_hint() {
    counter!("hints_total").increment(1);
}
