//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_upstream_requests_total` (counter): upstream calls by service, method, outcome
//! - `gateway_upstream_request_duration_seconds` (histogram): upstream call latency
//! - `gateway_responses_total` (counter): client responses by route class and status
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exposition only when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished upstream call.
pub fn record_upstream_call(service: &'static str, method: &str, outcome: &'static str, start: Instant) {
    let method = method.to_string();
    metrics::counter!(
        "gateway_upstream_requests_total",
        "service" => service,
        "method" => method.clone(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "gateway_upstream_request_duration_seconds",
        "service" => service,
        "method" => method
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a response produced by the gateway itself (404s and faults).
pub fn record_local_response(kind: &'static str, status: u16) {
    metrics::counter!(
        "gateway_responses_total",
        "kind" => kind,
        "status" => status.to_string()
    )
    .increment(1);
}
