//! Error types for the CIQUAL Explorer server

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Request-local errors. The server keeps running after any of these.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Decode(serde_json::Error),

    #[error("{0}")]
    Encode(serde_json::Error),
}

/// Startup errors raised while loading the bundled resources
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Decode(e) => tracing::warn!("Rejected request body: {}", e),
            AppError::Encode(e) => tracing::error!("Failed to encode response: {}", e),
        }

        // Plain text with the raw message, no structured error code.
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
