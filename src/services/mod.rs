//! Services Layer
//!
//! Business logic called by the webhook handlers.
//!
//! ```text
//! MT5 EA --> POST /mt5-webhook --> JournalService --> TradeMapper
//!                                        └──────────> Notion API
//! ```
//!
//! - `trade_mapper` - Trade record -> Notion properties
//! - `JournalService` - Credential check, mapping, page creation

pub mod journal_service;
pub mod trade_mapper;

pub use journal_service::{JournalService, RelayOutcome};
pub use trade_mapper::map_trade;
