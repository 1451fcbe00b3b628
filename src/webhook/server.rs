//! HTTP server for the MT5 webhook
//!
//! Provides:
//! - Health check (`GET /`, `GET /health`)
//! - Trade relay (`POST /mt5-webhook`)

use crate::error::Result;
use crate::state::AppState;
use crate::webhook::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Build the router with all routes and middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health_check))
        .route("/health", get(handlers::health_check))
        .route("/mt5-webhook", post(handlers::mt5_webhook))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Webhook server manager
pub struct WebhookServer {
    state: Arc<AppState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl WebhookServer {
    /// Create a new server
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            shutdown_tx: None,
            handle: None,
            local_addr: None,
        }
    }

    /// Bind and start serving in a background task.
    ///
    /// Returns the bound address, which differs from the configured one when
    /// port 0 was requested.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        let addr = self.state.config.bind_addr()?;

        if self.state.config.credentials().is_none() {
            warn!("NOTION_TOKEN or NOTION_DATABASE_ID not set; webhooks will be answered with ok=false");
        }

        let app = build_router(self.state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        info!("Starting MT5 relay server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        self.local_addr = Some(local_addr);

        self.handle = Some(tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Relay server shutting down");
            });

            if let Err(e) = server.await {
                error!("Relay server error: {}", e);
            }
        }));

        info!("=== Endpoints ===");
        info!("  GET  http://{}/", local_addr);
        info!("  GET  http://{}/health", local_addr);
        info!("  POST http://{}/mt5-webhook", local_addr);

        Ok(local_addr)
    }

    /// Stop the server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("Relay server stop signal sent");
        }
    }

    /// Wait for the server task to finish
    pub async fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("Relay server task failed: {}", e);
            }
        }
    }

    /// Check if server is running
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }

    /// Address the server is bound to, once started
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

impl Drop for WebhookServer {
    fn drop(&mut self) {
        self.stop();
    }
}
