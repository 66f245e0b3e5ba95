//! Listener binding and the serve loop.

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::error::{Result, ServerError};

/// Bind a TCP listener, mapping failures to [`ServerError::Bind`].
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve the mock API on `listener` until `shutdown` resolves.
///
/// The state is marked ready once serving starts and not ready again after
/// shutdown completes.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let router = create_router(state.clone());

    state.set_ready(true);
    info!("HTTP server listening on {}", addr);

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await;

    state.set_ready(false);
    info!("HTTP server stopped");

    Ok(result?)
}
