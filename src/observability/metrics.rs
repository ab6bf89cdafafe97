//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ha_selector_probes_total` (counter): probes by result
//! - `ha_selector_reselections_total` (counter): scans by outcome
//! - `ha_selector_backoff_interrupts_total` (counter): interrupted pauses
//! - `ha_selector_selected_candidate` (gauge): index of the installed candidate
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(metrics_addr = %addr, "Prometheus metrics exporter started"),
        Err(e) => tracing::error!(metrics_addr = %addr, error = %e, "Failed to install Prometheus exporter"),
    }
}

pub fn record_probe(healthy: bool) {
    let result = if healthy { "success" } else { "failure" };
    counter!("ha_selector_probes_total", "result" => result).increment(1);
}

/// `outcome` is one of `selected`, `exhausted`, `deadline`, `skipped`.
pub fn record_reselection(outcome: &'static str) {
    counter!("ha_selector_reselections_total", "outcome" => outcome).increment(1);
}

pub fn record_backoff_interrupt() {
    counter!("ha_selector_backoff_interrupts_total").increment(1);
}

pub fn record_selected_candidate(index: usize) {
    gauge!("ha_selector_selected_candidate").set(index as f64);
}
