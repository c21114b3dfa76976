//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, outcome
//! - `gateway_request_duration_seconds` (histogram): latency by method and
//!   outcome
//! - `gateway_calls_in_flight` (gauge): calls awaiting a runtime result
//!
//! Outcome labels: ok, app_error, runtime_error, deadline_exceeded,
//! transport_error, translate_error, bad_response.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one completed request. Called exactly once per inbound request.
pub fn record_request(method: &str, status: u16, outcome: &str, started_at: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "outcome" => outcome.to_string()
    )
    .record(started_at.elapsed().as_secs_f64());
}

/// Update the in-flight call gauge from the dispatcher registry.
pub fn set_calls_in_flight(count: usize) {
    metrics::gauge!("gateway_calls_in_flight").set(count as f64);
}
