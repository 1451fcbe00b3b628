//! Application state management

use crate::config::RelayConfig;
use crate::error::Result;
use crate::notion::NotionClient;

/// Application state shared by all request handlers.
///
/// Read-only after construction; handlers receive it behind an `Arc`.
pub struct AppState {
    pub config: RelayConfig,
    pub notion: NotionClient,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self> {
        let notion = NotionClient::new(&config)?;
        Ok(Self { config, notion })
    }
}
