//! Newsroom broadcaster.
//!
//! This crate owns the bot's behaviour: it keeps a queue of unseen
//! articles filled from a [`NewsFeed`], posts them one at a time through a
//! [`Transport`], and follows the transport's connection lifecycle so
//! scanning and posting only run while a session is open.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use article_store::ArticleStore;
//! use broadcaster::{BotConfig, NewsBot};
//! # use news_core::{NewsFeed, Transport};
//!
//! # async fn example(
//! #     feed: Arc<dyn NewsFeed>,
//! #     transport: Arc<dyn Transport>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let store = ArticleStore::open("./temp").await?;
//! let bot = NewsBot::new(BotConfig::new("GROUP_ID"), store, feed, transport);
//!
//! // Runs forever, reconnecting after every close.
//! tokio::spawn({
//!     let bot = bot.clone();
//!     async move { bot.run().await }
//! });
//!
//! println!("{}", bot.snapshot().await.status);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod pairing;
pub mod publisher;
pub mod scanner;
mod schedule;
pub mod settings;
pub mod state;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use article_store::ArticleStore;
use news_core::{NewsFeed, Transport};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

pub use config::BotConfig;
pub use error::{Error, Result};
pub use lifecycle::{next_status, Effect, Transition};
pub use publisher::PostOutcome;
pub use scanner::ScanOutcome;
pub use settings::{SettingsError, SettingsUpdate, ValidSettings};
pub use state::{BotState, ConnectionStatus, SessionId, StatusSnapshot};

use schedule::Timers;

/// The news bot.
///
/// Cheap to clone; all clones share one state, one store and one set of
/// timers.
#[derive(Clone)]
pub struct NewsBot {
    inner: Arc<BotInner>,
}

struct BotInner {
    config: BotConfig,
    store: ArticleStore,
    feed: Arc<dyn NewsFeed>,
    transport: Arc<dyn Transport>,
    state: RwLock<BotState>,
    timers: Mutex<Timers>,
    /// Held for the whole of one post so posts never overlap.
    posting: Mutex<()>,
    sessions: AtomicU64,
}

impl NewsBot {
    /// Create a bot. Nothing runs until [`NewsBot::run`] is spawned.
    pub fn new(
        config: BotConfig,
        store: ArticleStore,
        feed: Arc<dyn NewsFeed>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        info!(
            feed = feed.name(),
            transport = transport.name(),
            destination = %config.destination,
            "News bot created"
        );
        let state = BotState::new(config.post_interval);
        Self {
            inner: Arc::new(BotInner {
                config,
                store,
                feed,
                transport,
                state: RwLock::new(state),
                timers: Mutex::new(Timers::default()),
                posting: Mutex::new(()),
                sessions: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &ArticleStore {
        &self.inner.store
    }

    /// A copy of the current state.
    pub async fn state(&self) -> BotState {
        self.inner.state.read().await.clone()
    }

    pub async fn status(&self) -> ConnectionStatus {
        self.inner.state.read().await.status
    }

    /// State plus store counts, for the control surface.
    pub async fn snapshot(&self) -> StatusSnapshot {
        let counts = self.inner.store.counts().await;
        let state = self.inner.state.read().await;
        StatusSnapshot {
            posted: counts.posted,
            queued: counts.queued,
            status: state.status,
            is_active: state.is_active,
            pairing_image: state.pairing_image.clone(),
            post_interval: state.post_interval,
        }
    }

    /// Apply an operator settings change.
    ///
    /// Nothing changes if validation fails. A new interval restarts the
    /// post timer so exactly one timer runs at the new period.
    pub async fn apply_settings(&self, update: SettingsUpdate) -> Result<ValidSettings> {
        let valid = update.validate()?;

        {
            let mut state = self.inner.state.write().await;
            if let Some(active) = valid.is_active {
                state.is_active = active;
            }
            if let Some(interval) = valid.post_interval {
                state.post_interval = interval;
            }
        }

        if let Some(active) = valid.is_active {
            info!(active, "Bot toggled");
        }
        if let Some(interval) = valid.post_interval {
            info!(interval = ?interval, "Post interval changed");
            self.reset_post_timer().await;
        }

        Ok(valid)
    }
}

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
