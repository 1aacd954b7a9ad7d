#![allow(dead_code)]

pub mod config;
pub mod mock_llm;
pub mod mock_search;
pub mod mock_weather;
pub mod mock_whisper;
pub mod server;

use std::net::SocketAddr;

use axum::Router;
use tokio_util::sync::CancellationToken;

/// Serve a mock upstream on a random local port
pub async fn spawn_mock(app: Router) -> anyhow::Result<(SocketAddr, CancellationToken)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_clone.cancelled().await;
            })
            .await
            .ok();
    });

    Ok((addr, shutdown))
}
