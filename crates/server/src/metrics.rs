//! Prometheus metrics

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder; call once at startup
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");
    let _ = PROMETHEUS_HANDLE.set(handle);
}

/// Record one chat turn and its latency
pub fn record_turn(latency_ms: f64) {
    metrics::counter!("qualify_turns_total").increment(1);
    metrics::histogram!("qualify_turn_latency_ms").record(latency_ms);
}

/// Record a completed conversation by final status
pub fn record_completion(status: &str) {
    metrics::counter!("qualify_completions_total", "status" => status.to_string()).increment(1);
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => handle.render(),
        None => String::new(),
    }
}
