//! HTTP server assembly
//!
//! Builds every service from configuration, merges the feature routers and
//! wraps them in the shared middleware stack.

#![allow(clippy::missing_errors_doc)]

mod client_context;
mod cors;
mod error;
mod health;
mod site;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    middleware::Next,
};
use tower_http::trace::TraceLayer;
use uchat_config::Config;

pub use error::ApiError;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a provider cannot be initialized or the upload
    /// directory cannot be created
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address;

        tokio::fs::create_dir_all(&config.uploads.directory)
            .await
            .with_context(|| format!("failed to create upload directory {}", config.uploads.directory.display()))?;

        let store = uchat_store::build_store(&config.storage);
        let realtime = uchat_realtime::build_service(&config)?;
        let media = uchat_media::build_service(&config, Arc::clone(&store))?;
        let chat = uchat_chat::build_service(&config, Arc::clone(&realtime), Arc::clone(&store))?;

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.merge(uchat_chat::endpoint_router().with_state(chat));
        app = app.merge(uchat_realtime::endpoint_router().with_state(realtime));
        app = app.merge(uchat_media::endpoint_router(config.uploads.max_bytes).with_state(media));
        app = app.merge(site::endpoint_router().with_state(store));

        // Apply middleware layers (innermost first)

        // Caller address and user agent for handlers
        let client_ip = config.server.client_ip.clone();
        app = app.layer(axum::middleware::from_fn(move |req: Request, next: Next| {
            let config = client_ip.clone();
            async move { client_context::client_context_middleware(config, req, next).await }
        }));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        app = app.layer(cors::cors_layer(config.server.cors.as_ref()));

        // JSON body limit; upload routes raise their own
        app = app.layer(DefaultBodyLimit::max(config.server.max_body_bytes));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
