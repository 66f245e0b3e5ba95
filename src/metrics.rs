//! Prometheus metrics for request counts and scan latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::Result;

// === Metric Name Constants ===

/// Scan handling latency metric name (includes the artificial delay).
pub const METRIC_SCAN_LATENCY: &str = "scan_latency_ms";
/// Scan requests served counter metric name.
pub const METRIC_SCANS_SERVED: &str = "scans_served_total";
/// Test endpoint requests counter metric name.
pub const METRIC_TEST_REQUESTS: &str = "test_requests_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_SCAN_LATENCY,
        "Mock scan handling latency in milliseconds"
    );
    describe_counter!(METRIC_SCANS_SERVED, "Total number of mock scans served");
    describe_counter!(
        METRIC_TEST_REQUESTS,
        "Total number of requests to the test endpoint"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

/// Increment scans served counter.
pub fn inc_scans_served() {
    counter!(METRIC_SCANS_SERVED).increment(1);
}

/// Increment test requests counter.
pub fn inc_test_requests() {
    counter!(METRIC_TEST_REQUESTS).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for scan handling.
pub fn timer_scan() -> LatencyTimer {
    LatencyTimer::new(METRIC_SCAN_LATENCY)
}
