// ABOUTME: Gateway startup: one engine connection attempt and the HTTP listener.
// ABOUTME: A failed connection still serves, with engine routes answering 503.

use super::{AppState, create_router};
use crate::config::ServerConfig;
use crate::engine::{BollardEngine, EngineConfig, EngineInfo};
use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Connect to the local engine once.
///
/// A failure is logged and yields a disconnected state; the gateway still
/// starts and answers 503 on engine-backed endpoints.
pub async fn connect_state(config: &EngineConfig) -> AppState {
    match BollardEngine::connect(config).await {
        Ok(engine) => {
            let info = engine.runtime_info();
            match engine.info().await {
                Ok(meta) => tracing::info!(
                    runtime = %info.runtime_type,
                    socket = %info.socket_path,
                    version = %meta.version,
                    "connected to container engine"
                ),
                Err(e) => tracing::info!(
                    runtime = %info.runtime_type,
                    socket = %info.socket_path,
                    error = %e,
                    "connected to container engine, version unknown"
                ),
            }
            AppState::connected(Arc::new(engine))
        }
        Err(e) => {
            tracing::warn!(kind = ?e.kind(), error = %e, "container engine unavailable");
            AppState::disconnected()
        }
    }
}

/// Bind the listener and serve requests until the process is stopped.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| Error::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(
        address = %addr,
        docker_connected = state.is_connected(),
        "gateway listening"
    );

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
