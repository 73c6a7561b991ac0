//! Error types for collaborator operations.

use thiserror::Error;

/// Errors reported by a messaging transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No session is currently open.
    #[error("transport is not connected")]
    NotConnected,

    /// Starting a session failed.
    #[error("failed to start session: {0}")]
    Start(String),

    /// Sending a message failed.
    #[error("send failed: {0}")]
    Send(String),

    /// Saving or clearing session credentials failed.
    #[error("credentials error: {0}")]
    Credentials(String),
}

/// Errors reported by a news feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The HTTP request could not be completed.
    #[error("request failed: {0}")]
    Request(String),

    /// The feed answered with an error status.
    #[error("feed error {code}: {message}")]
    Api { code: String, message: String },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}
