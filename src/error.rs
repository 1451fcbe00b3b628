//! Application error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::webhook::RelayResponse;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Notion answered with a status >= 400. `body` is the response text, untouched.
    #[error("Notion API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Request body is not a JSON object
    #[error("Invalid trade payload: {0}")]
    InvalidPayload(String),

    #[error("could not convert {field} value {value} to a number")]
    InvalidNumber { field: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Stable machine-readable code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::InvalidPayload(_) => "INVALID_PAYLOAD",
            AppError::InvalidNumber { .. } => "INVALID_NUMBER",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    /// HTTP status used when the error escapes a handler
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Http(_) | AppError::Serialization(_) | AppError::Upstream { .. } => {
                StatusCode::BAD_GATEWAY
            }
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidNumber { .. } | AppError::Config(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(code = self.code(), "request failed: {}", self);
        let message = match &self {
            AppError::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        };
        (self.status_code(), Json(RelayResponse::failed(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
