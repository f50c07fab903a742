//! HTTP server exposing the status API

pub mod router;

pub use router::{AppState, build_router};

use std::future::Future;

use tokio::net::TcpListener;

use crate::context::AppContext;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to address
    #[error("Failed to bind to {addr}: {message}")]
    Bind { addr: String, message: String },

    /// Failed to serve requests
    #[error("Server error: {0}")]
    Serve(String),

    /// Failed to assemble the application state
    #[error("Startup error: {0}")]
    Startup(#[from] libhubstat::HubStatError),
}

/// Serve `state` on `addr` until `shutdown` resolves
pub async fn run(
    addr: &str,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            message: e.to_string(),
        })?;

    let local = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| addr.to_string());
    tracing::info!("Server listening on {}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Handle the serve command
pub async fn handle_serve(ctx: &AppContext, bind: Option<&str>) {
    let addr = bind.unwrap_or(&ctx.config.server.bind).to_string();

    let result = match ctx.status_service() {
        Ok(service) => run(&addr, AppState { service }, shutdown_signal()).await,
        Err(e) => Err(ServerError::from(e)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests;
