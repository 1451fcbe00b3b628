//! Journal Service
//!
//! Relays one trade into the Notion journal database.
//! Called by the `/mt5-webhook` handler.

use crate::config::{NOTION_DATABASE_ID_ENV, NOTION_TOKEN_ENV};
use crate::error::{AppError, Result};
use crate::services::trade_mapper::map_trade;
use crate::state::AppState;
use crate::webhook::TradeRecord;
use tracing::{info, warn};

/// Result of relaying a trade
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// Notion created the page
    Created { page_id: Option<String> },
    /// Not relayed; `error` is returned to the caller as-is
    Failed { error: String },
}

/// Journal service for business logic
pub struct JournalService;

impl JournalService {
    /// Map `trade` and create one Notion page for it.
    ///
    /// Missing credentials and Notion rejections are `Failed` outcomes.
    /// Malformed numbers and transport failures are errors. Never retries.
    pub async fn record_trade(state: &AppState, trade: &TradeRecord) -> Result<RelayOutcome> {
        let Some((token, database_id)) = state.config.credentials() else {
            return Ok(missing_credentials());
        };

        let properties = map_trade(trade)?;

        info!(
            "JournalService::record_trade symbol={} side={}",
            trade.text("symbol").unwrap_or_default(),
            trade.text("side").unwrap_or_default(),
        );

        match state.notion.create_page(token, database_id, &properties).await {
            Ok(page_id) => {
                info!("Trade journaled as page {:?}", page_id);
                Ok(RelayOutcome::Created { page_id })
            }
            Err(AppError::Upstream { status, body }) => {
                warn!("Notion returned {}: {}", status, body);
                Ok(RelayOutcome::Failed { error: body })
            }
            Err(e) => Err(e),
        }
    }

    /// `Some(Failed)` when the token or database id is not configured.
    ///
    /// Runs before the request body is parsed, so a caller always learns
    /// about missing credentials first.
    pub fn check_credentials(state: &AppState) -> Option<RelayOutcome> {
        match state.config.credentials() {
            Some(_) => None,
            None => Some(missing_credentials()),
        }
    }
}

fn missing_credentials() -> RelayOutcome {
    warn!("Trade received but Notion credentials are not configured");
    RelayOutcome::Failed {
        error: format!("Server missing {} or {}", NOTION_TOKEN_ENV, NOTION_DATABASE_ID_ENV),
    }
}
