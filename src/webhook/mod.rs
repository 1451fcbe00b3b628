//! Webhook server module
//!
//! Receives closed/open trades from a MetaTrader 5 Expert Advisor and
//! relays each one to a Notion database.
//!
//! Usage:
//! 1. Set `NOTION_TOKEN` and `NOTION_DATABASE_ID` (or put them in `.env`)
//! 2. Start the relay and expose its port
//! 3. Point the EA's WebRequest at `<url>/mt5-webhook`

mod server;
pub mod handlers;
mod types;

pub use server::{build_router, WebhookServer};
pub use types::{RelayResponse, TradeRecord};
