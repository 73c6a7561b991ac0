//! Process-wide bot state.

use std::fmt;
use std::time::Duration;

/// Connectivity of the messaging session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    QrReady,
    Active,
}

impl ConnectionStatus {
    /// Label shown on the dashboard.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::QrReady => "QR Ready",
            ConnectionStatus::Active => "Active",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one open session. A new id is issued on every open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Mutable bot state.
///
/// Status, pairing image and session belong to the lifecycle controller;
/// `is_active` and `post_interval` belong to the control surface.
#[derive(Debug, Clone)]
pub struct BotState {
    pub status: ConnectionStatus,
    /// Operator kill-switch, independent of connectivity.
    pub is_active: bool,
    pub post_interval: Duration,
    /// Data URL of the current pairing QR code.
    pub pairing_image: Option<String>,
    pub session: Option<SessionId>,
}

impl BotState {
    /// Initial state at process start.
    pub fn new(post_interval: Duration) -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            is_active: true,
            post_interval,
            pairing_image: None,
            session: None,
        }
    }

    /// Whether scans may run: enabled and connected.
    pub fn can_scan(&self) -> bool {
        self.is_active && self.status == ConnectionStatus::Active
    }

    /// Whether posts may run: enabled, connected and holding a session.
    pub fn can_post(&self) -> bool {
        self.can_scan() && self.session.is_some()
    }
}

/// Point-in-time view for the control surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub posted: usize,
    pub queued: usize,
    pub status: ConnectionStatus,
    pub is_active: bool,
    pub pairing_image: Option<String>,
    pub post_interval: Duration,
}
