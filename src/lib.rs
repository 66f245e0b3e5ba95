//! Mock 3D-scan processing API.
//!
//! Lets a frontend develop against a fake backend: `POST /api/scan` waits two
//! seconds and answers with a canned payload pointing at a static model file,
//! `GET /api/test` answers immediately with a fixed message.
//!
//! ```text
//! POST /api/scan  -> {"status":"success","message":"Mock scan processed",
//!                     "modelUrl":"models/130.glb","scanId":"mock_<secs>",
//!                     "timestamp":"YYYY-MM-DDTHH:MM:SS"}
//! GET  /api/test  -> {"message":"Mock API is working!"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`scan`]: Canned scan payloads and the delayed scanner
//! - [`api`]: HTTP routes and handlers
//! - [`server`]: Listener binding and serving
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod scan;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServerError};
