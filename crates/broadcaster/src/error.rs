//! Error types for the bot.

use news_core::TransportError;
use thiserror::Error;

use crate::settings::SettingsError;

/// Errors surfaced to callers of [`crate::NewsBot`].
#[derive(Debug, Error)]
pub enum Error {
    /// The session is not open.
    #[error("Not connected")]
    NotConnected,

    /// The transport refused the operation.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid operator input.
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// The pairing payload could not be rendered.
    #[error("Pairing image error: {0}")]
    Pairing(String),
}

/// Result alias for bot operations.
pub type Result<T> = std::result::Result<T, Error>;
