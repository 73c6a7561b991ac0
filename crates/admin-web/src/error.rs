//! Error types for the admin web interface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur in the admin web interface.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Rejected operator input.
    #[error("{0}")]
    InvalidInput(String),

    /// Bot operation failed.
    #[error("Bot error: {0}")]
    Bot(broadcaster::Error),
}

impl From<broadcaster::Error> for AdminError {
    fn from(err: broadcaster::Error) -> Self {
        match err {
            broadcaster::Error::Settings(e) => AdminError::InvalidInput(e.to_string()),
            other => AdminError::Bot(other),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AdminError::InvalidInput(msg) => {
                tracing::warn!("Rejected input: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AdminError::Bot(err) => {
                tracing::error!("Bot error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
