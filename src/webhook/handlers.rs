//! Webhook endpoint handlers
//!
//! Provides handlers for:
//! - Health check (`/`, `/health`)
//! - MT5 trade webhook (`/mt5-webhook`)

use crate::error::Result;
use crate::services::{JournalService, RelayOutcome};
use crate::state::AppState;
use crate::webhook::types::*;
use axum::{
    body::Bytes,
    extract::{Json, State as AxumState},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint - GET / or GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(RelayResponse::healthy())
}

// ============================================================================
// MT5 Webhook Handler
// ============================================================================

/// MT5 trade webhook - POST /mt5-webhook
///
/// The body is parsed as JSON whatever `Content-Type` says: MQL5's
/// `WebRequest` sends `application/x-www-form-urlencoded` by default.
/// Missing credentials are reported before the body is looked at.
/// Missing credentials and Notion rejections are answered with
/// `200 {"ok": false, ...}`; an unparseable body, a malformed numeric field
/// or a transport failure escapes as an `AppError` response.
pub async fn mt5_webhook(
    AxumState(state): AxumState<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RelayResponse>> {
    info!("Received MT5 trade webhook ({} bytes)", body.len());

    if let Some(outcome) = JournalService::check_credentials(&state) {
        return Ok(Json(outcome.into()));
    }

    let trade = TradeRecord::from_body(&body)?;
    let outcome = JournalService::record_trade(&state, &trade).await?;

    Ok(Json(outcome.into()))
}

impl From<RelayOutcome> for RelayResponse {
    fn from(outcome: RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Created { page_id } => RelayResponse::created(page_id),
            RelayOutcome::Failed { error } => RelayResponse::failed(error),
        }
    }
}
