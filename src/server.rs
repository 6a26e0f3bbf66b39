//! Listener setup and the serve loop.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::{Result, ServiceError};

/// Bind the listener. Fails immediately if the address is unavailable.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServiceError::Bind { addr, source })
}

/// Serve `router` on an already bound listener until the process exits.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    axum::serve(listener, router)
        .await
        .map_err(ServiceError::Serve)
}

/// Bind according to `config`, announce the port and serve forever.
pub async fn run(config: &Config) -> Result<()> {
    let listener = bind(config.socket_addr()).await?;
    let port = listener
        .local_addr()
        .map(|addr| addr.port())
        .unwrap_or(config.port);
    info!("Healthcheck service running on port {}", port);

    serve(listener, create_router(AppState::from_config(config))).await
}
