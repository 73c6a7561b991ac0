//! Messaging transport trait and connection events.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::TransportError;

/// Close status that means the session was invalidated server-side.
pub const LOGGED_OUT_STATUS: u16 = 401;

/// Why a session closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseReason {
    /// Status code reported by the transport, if any.
    pub status_code: Option<u16>,
    /// Free-form detail for logs.
    pub message: Option<String>,
}

impl CloseReason {
    /// A close with no status code, e.g. a dropped connection.
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: Some(message.into()),
        }
    }

    /// A close carrying a status code.
    pub fn with_status(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: Some(message.into()),
        }
    }

    /// A server-side logout.
    pub fn logged_out() -> Self {
        Self::with_status(LOGGED_OUT_STATUS, "logged out")
    }

    /// Whether this close means the credentials are no longer valid.
    pub fn is_logged_out(&self, logout_status: u16) -> bool {
        self.status_code == Some(logout_status)
    }
}

/// Connection-state changes emitted by a transport, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A one-time pairing payload to show to the operator.
    PairingIssued(String),
    /// The session is open and can send.
    Opened,
    /// The session closed.
    Closed(CloseReason),
    /// Session credentials changed and should be persisted.
    CredentialsUpdated,
}

/// A messaging session the bot broadcasts through.
///
/// The bot drives one session at a time: it calls [`Transport::start`],
/// consumes the returned events until a [`TransportEvent::Closed`] arrives
/// (or the channel ends), then starts again.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start a new session. Events for this session arrive on the receiver.
    async fn start(&self) -> Result<mpsc::Receiver<TransportEvent>, TransportError>;

    /// Send a text message to a destination.
    async fn send_text(&self, destination: &str, text: &str) -> Result<(), TransportError>;

    /// Persist the current session credentials.
    async fn save_credentials(&self) -> Result<(), TransportError>;

    /// Discard session credentials so the next start pairs afresh.
    async fn clear_credentials(&self) -> Result<(), TransportError>;

    /// Transport name for logs.
    fn name(&self) -> &str;
}
