//! MT5 Trade Journal Relay
//!
//! Receives trade webhooks from a MetaTrader 5 terminal and records each
//! trade as a page in a Notion database.

pub mod config;
pub mod error;
pub mod notion;
pub mod services;
pub mod state;
pub mod webhook;

use config::RelayConfig;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webhook::WebhookServer;

/// Install the global tracing subscriber (`RUST_LOG` overrides the default filter)
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mt5_notion_relay=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load configuration, start the server and run until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    tracing::info!("Starting MT5 Notion relay...");

    let config = RelayConfig::from_env()?;
    tracing::debug!("Loaded config: {:?}", config);

    let state = Arc::new(AppState::new(config)?);
    let mut server = WebhookServer::new(state);
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl-C received");

    server.stop();
    server.wait().await;
    Ok(())
}
