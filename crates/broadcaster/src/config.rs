//! Bot tuning.

use std::time::Duration;

use news_core::LOGGED_OUT_STATUS;

/// Default time between posts.
pub const DEFAULT_POST_INTERVAL: Duration = Duration::from_secs(30);

/// Default time between feed scans.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Default maximum number of queued articles.
pub const DEFAULT_QUEUE_CAP: usize = 500;

/// Default pause before restarting a closed session.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Configuration for [`crate::NewsBot`].
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Destination every article is broadcast to.
    pub destination: String,
    /// Initial time between posts.
    pub post_interval: Duration,
    /// Time between feed scans while connected.
    pub scan_interval: Duration,
    /// Maximum queue length after a scan. Oldest entries are dropped.
    pub queue_cap: usize,
    /// Pause before restarting a closed session.
    pub reconnect_delay: Duration,
    /// Close status that means the credentials were revoked.
    pub logout_status: u16,
}

impl BotConfig {
    /// Default tuning for the given destination.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            post_interval: DEFAULT_POST_INTERVAL,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            queue_cap: DEFAULT_QUEUE_CAP,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            logout_status: LOGGED_OUT_STATUS,
        }
    }
}
