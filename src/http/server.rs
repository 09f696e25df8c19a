//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for the selected entry point
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::fmt;
use std::sync::Arc;

use axum::{
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::EdgeConfig;
use crate::gateway::{chat_handler, not_found, page_handler};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::proxy::proxy_handler;
use crate::upstream::build_client;

/// Which handler set a server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    /// Forward everything to the upstream.
    Proxy,
    /// Serve the chat page and chat endpoint.
    Gateway,
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPoint::Proxy => f.write_str("proxy"),
            EntryPoint::Gateway => f.write_str("gateway"),
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EdgeConfig>,
    pub client: reqwest::Client,
}

/// HTTP server for one entry point.
pub struct HttpServer {
    router: Router,
    config: Arc<EdgeConfig>,
    entry: EntryPoint,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig, entry: EntryPoint) -> Result<Self, reqwest::Error> {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
            client: build_client()?,
        };

        let router = Self::build_router(entry, state);
        Ok(Self {
            router,
            config,
            entry,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(entry: EntryPoint, state: AppState) -> Router {
        let routes = match entry {
            EntryPoint::Proxy => Router::new()
                .route("/", any(proxy_handler))
                .route("/{*path}", any(proxy_handler)),
            EntryPoint::Gateway => Router::new()
                .route("/", get(page_handler).fallback(not_found))
                .route(
                    &state.config.gateway.chat_path,
                    post(chat_handler).fallback(not_found),
                )
                .fallback(not_found),
        };

        routes.with_state(state).layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
    }

    /// The fully layered router, for serving or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            entry = %self.entry,
            upstream = %self.config.upstream.host,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    pub fn entry(&self) -> EntryPoint {
        self.entry
    }
}
