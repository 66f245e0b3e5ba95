//! HTTP API module: mock scan endpoints plus health, status and metrics.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
