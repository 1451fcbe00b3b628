//! Webhook request and response types
//!
//! The MT5 Expert Advisor builds its JSON by hand, so numeric fields arrive
//! either as JSON numbers or as strings. Values are kept raw in
//! [`TradeRecord`] and coerced only when a property is built.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Trade Record
// ============================================================================

/// Incoming trade payload - POST /mt5-webhook
///
/// An unordered field -> value mapping. Every field is optional; unknown
/// fields are kept but ignored by the mapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeRecord(Map<String, Value>);

impl TradeRecord {
    /// Value of `field`, treating JSON `null` as absent
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// True when `field` holds something other than null, "", 0, false, [] or {}
    pub fn has(&self, field: &str) -> bool {
        self.get(field).map(is_truthy).unwrap_or(false)
    }

    /// `field` rendered as text, or `None` when absent
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(render_text)
    }

    /// `field` rendered as text only when it is non-empty
    pub fn non_empty_text(&self, field: &str) -> Option<String> {
        if self.has(field) {
            self.text(field)
        } else {
            None
        }
    }

    /// Numeric `field`, defaulting to 0 when absent or empty
    pub fn number_or_zero(&self, field: &str) -> Result<f64> {
        match self.get(field) {
            Some(value) if is_truthy(value) => coerce_number(field, value),
            _ => Ok(0.0),
        }
    }

    /// Numeric `field`, `None` when absent. An empty string is malformed.
    pub fn optional_number(&self, field: &str) -> Result<Option<f64>> {
        self.get(field).map(|v| coerce_number(field, v)).transpose()
    }

    /// `tags` as a list: either a JSON array or a comma-separated string
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter(|v| !v.is_null())
                .map(render_text)
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            Some(other) if is_truthy(other) => vec![render_text(other)],
            _ => Vec::new(),
        }
    }

    /// Parse a raw request body, whatever content type the caller declared.
    ///
    /// Trailing NUL bytes are dropped: MQL5's `StringToCharArray` includes
    /// the string terminator unless the EA trims it.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let end = body.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        serde_json::from_slice(&body[..end]).map_err(|e| AppError::InvalidPayload(e.to_string()))
    }
}

impl TryFrom<Value> for TradeRecord {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Strings verbatim, numbers in JSON form, anything else as compact JSON
fn render_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Accept numbers, numeric strings and booleans
fn coerce_number(field: &str, value: &Value) -> Result<f64> {
    let invalid = || AppError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => n.as_f64().ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid()),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        _ => Err(invalid()),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// JSON body returned by every route
///
/// `{"ok": true}`, `{"ok": true, "pageId": ...}` or `{"ok": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Created {
        ok: bool,
        #[serde(rename = "pageId")]
        page_id: Option<String>,
    },
    Failed {
        ok: bool,
        error: String,
    },
    Healthy {
        ok: bool,
    },
}

impl RelayResponse {
    pub fn healthy() -> Self {
        RelayResponse::Healthy { ok: true }
    }

    pub fn created(page_id: Option<String>) -> Self {
        RelayResponse::Created { ok: true, page_id }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        RelayResponse::Failed {
            ok: false,
            error: error.into(),
        }
    }
}
