//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): `/r` requests by method, status, outcome
//! - `proxy_request_duration_seconds` (histogram): latency by outcome
//! - `proxy_rewritten_links_total` (counter): attributes replaced with proxy links
//!
//! Outcomes: `rewritten`, `passthrough`, `rejected`, `upstream_error`.

use axum::http::{Method, StatusCode};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished `/r` request.
pub fn record_request(method: &Method, status: StatusCode, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.as_u16().to_string(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!("proxy_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record how many attributes one document rewrite replaced.
pub fn record_rewritten_links(count: usize) {
    metrics::counter!("proxy_rewritten_links_total").increment(count as u64);
}
