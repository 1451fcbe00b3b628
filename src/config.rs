//! Relay configuration loaded from the environment
//!
//! A `.env` file in the working directory is read first (see `main.rs`),
//! then the process environment is consulted.

use crate::error::{AppError, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";
pub const NOTION_DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_API_URL: &str = "https://api.notion.com";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Server and Notion settings
#[derive(Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub notion_token: Option<String>,
    pub notion_database_id: Option<String>,
    /// Base URL of the Notion API, without the `/v1` suffix
    pub notion_api_url: String,
    pub timeout: Duration,
}

impl RelayConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("NOTION_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!("Invalid NOTION_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            notion_token: get(NOTION_TOKEN_ENV),
            notion_database_id: get(NOTION_DATABASE_ID_ENV),
            notion_api_url: get("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Address the webhook server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid address {}:{}: {}", self.host, self.port, e)))
    }

    /// Token and database id, if both are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.notion_token, &self.notion_database_id) {
            (Some(token), Some(db)) => Some((token.as_str(), db.as_str())),
            _ => None,
        }
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("notion_token", &self.notion_token.as_ref().map(|_| "<redacted>"))
            .field("notion_database_id", &self.notion_database_id)
            .field("notion_api_url", &self.notion_api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
