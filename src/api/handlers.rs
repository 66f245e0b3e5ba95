//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::info;

use crate::metrics;
use crate::scan::{MessageResponse, MockScanner, ScanResponse};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Whether the listener is bound and serving.
    pub ready: Arc<AtomicBool>,
    /// Number of completed mock scans.
    pub scans_served: Arc<AtomicU64>,
    /// When the state was created.
    pub started_at: Instant,
    /// Scan simulator.
    pub scanner: MockScanner,
    /// Prometheus handle, present when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with the standard scan delay.
    pub fn new() -> Self {
        Self::with_scanner(MockScanner::new())
    }

    /// Create app state around a specific scanner.
    pub fn with_scanner(scanner: MockScanner) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            scans_served: Arc::new(AtomicU64::new(0)),
            started_at: Instant::now(),
            scanner,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` can render it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Number of scans served so far.
    pub fn scan_count(&self) -> u64 {
        self.scans_served.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("ready", &self.is_ready())
            .field("scans_served", &self.scan_count())
            .field("scanner", &self.scanner)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
}

/// Status response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// "starting" or "running".
    pub status: &'static str,
    /// Completed mock scans.
    pub scans_served: u64,
    /// Seconds since startup.
    pub uptime_seconds: u64,
}

/// Mock scan handler - waits out the delay, then returns the canned payload.
///
/// Any request body is ignored.
pub async fn scan(State(state): State<AppState>) -> Json<ScanResponse> {
    let _timer = metrics::timer_scan();

    let response = state.scanner.process().await;

    let served = state.scans_served.fetch_add(1, Ordering::Relaxed) + 1;
    metrics::inc_scans_served();
    info!(scan_id = %response.scan_id, served, "Mock scan processed");

    Json(response)
}

/// Test handler - confirms the API is reachable.
pub async fn test_endpoint() -> Json<MessageResponse> {
    metrics::inc_test_requests();
    Json(MessageResponse::working())
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - returns scan count and uptime.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.is_ready() { "running" } else { "starting" };

    Json(StatusResponse {
        status,
        scans_served: state.scan_count(),
        uptime_seconds: state.uptime().as_secs(),
    })
}

/// Prometheus exposition handler - 404 when no recorder is installed.
pub async fn metrics_endpoint(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
