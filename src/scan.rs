//! Mock scan processing.
//!
//! There is no real scanning here: a scan request waits for a fixed delay and
//! then answers with a canned payload pointing at a static model file.

use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Artificial processing delay applied to every scan.
pub const SCAN_DELAY: Duration = Duration::from_secs(2);

/// Model file returned by every scan.
pub const MODEL_URL: &str = "models/130.glb";

/// Prefix of generated scan ids.
pub const SCAN_ID_PREFIX: &str = "mock_";

/// Wire format of the `timestamp` field (local time, no offset).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Message returned by the test endpoint.
pub const TEST_MESSAGE: &str = "Mock API is working!";

/// Payload returned by `POST /api/scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Always "success".
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// Relative path of the model file.
    pub model_url: String,
    /// `mock_<unix-seconds>`.
    pub scan_id: String,
    /// Local time in [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

impl ScanResponse {
    /// Build the canned scan payload stamped with `now`.
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            status: "success".to_string(),
            message: "Mock scan processed".to_string(),
            model_url: MODEL_URL.to_string(),
            scan_id: format!("{}{}", SCAN_ID_PREFIX, now.timestamp()),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Seconds encoded in the scan id, if it is well formed.
    pub fn scan_seconds(&self) -> Option<i64> {
        self.scan_id.strip_prefix(SCAN_ID_PREFIX)?.parse().ok()
    }
}

/// Payload returned by `GET /api/test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// The fixed "API is working" message.
    pub fn working() -> Self {
        Self {
            message: TEST_MESSAGE.to_string(),
        }
    }
}

/// Produces scan responses after the artificial delay.
#[derive(Debug, Clone)]
pub struct MockScanner {
    delay: Duration,
}

impl MockScanner {
    /// Scanner with the standard two-second delay.
    pub fn new() -> Self {
        Self { delay: SCAN_DELAY }
    }

    /// Scanner with a custom delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay, then return a freshly stamped response.
    pub async fn process(&self) -> ScanResponse {
        debug!(delay_ms = self.delay.as_millis() as u64, "Simulating scan processing");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        ScanResponse::at(Local::now())
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}
