//! Metrics collection.
//!
//! # Metrics
//! - `pixano_api_requests_total` (counter): API requests by method, partition, status
//! - `pixano_startup_phase_seconds` (histogram): time spent reaching each startup phase
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding process installs a recorder.

use std::time::Instant;

/// Count one API request. `partition` must come from a bounded set.
pub fn record_api_request(method: &'static str, partition: &'static str, status: u16) {
    metrics::counter!(
        "pixano_api_requests_total",
        "method" => method,
        "partition" => partition,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record how long it took to reach `phase` since `started`.
pub fn record_startup_phase(phase: &'static str, started: Instant) {
    metrics::histogram!("pixano_startup_phase_seconds", "phase" => phase)
        .record(started.elapsed().as_secs_f64());
}
