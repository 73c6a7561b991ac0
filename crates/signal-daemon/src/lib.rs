//! Signal-cli daemon client library.
//!
//! This crate provides a Rust client for communicating with the signal-cli daemon
//! over HTTP JSON-RPC, and a [`SignalTransport`] that lets the broadcaster use a
//! linked Signal device as its messaging session. It supports:
//!
//! - Sending messages to individuals and groups
//! - Linking a new device (the pairing QR code) and resuming a linked one
//! - Persisting which account is linked between restarts
//!
//! # Example
//!
//! ```no_run
//! use signal_daemon::{DaemonConfig, SendParams, SignalClient};
//!
//! # async fn example() -> Result<(), signal_daemon::DaemonError> {
//! let config = DaemonConfig::with_account("http://localhost:8080", "+1234567890");
//! let client = SignalClient::connect(config).await?;
//!
//! let result = client.send(SendParams::group("GROUP_ID", "Hello group!")).await?;
//! println!("Sent at timestamp: {}", result.timestamp);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;
pub mod types;

pub use client::SignalClient;
pub use config::DaemonConfig;
pub use error::DaemonError;
pub use session::{SessionCredentials, SessionFile, SESSION_FILE};
pub use transport::{SignalTransport, SignalTransportConfig};
pub use types::*;
