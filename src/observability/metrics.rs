//! Metrics collection and exposition.
//!
//! # Metrics
//! - `webhook_deliveries_total` (counter): deliveries by outcome
//! - `webhook_delivery_duration_seconds` (histogram): time to respond, by outcome
//! - `webhook_updates_total` (counter): update procedure runs by result
//! - `webhook_update_duration_seconds` (histogram): update procedure run time

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished delivery.
pub fn record_delivery(outcome: &'static str, start: Instant) {
    counter!("webhook_deliveries_total", "outcome" => outcome).increment(1);
    histogram!("webhook_delivery_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a finished update procedure run.
pub fn record_update(result: &'static str, start: Instant) {
    counter!("webhook_updates_total", "result" => result).increment(1);
    histogram!("webhook_update_duration_seconds", "result" => result)
        .record(start.elapsed().as_secs_f64());
}
