//! JSON-file persistence for the newsroom broadcaster.
//!
//! Two flat files live in the data directory:
//!
//! - `news_queue.json` - the pending queue, an array of articles in FIFO order
//! - `posted_news.json` - the sent history, an array of urls, newest last
//!
//! Both are read and overwritten whole. Every read-modify-write runs under
//! one async mutex, taken with [`ArticleStore::lock`], so a scan and a post
//! that overlap cannot lose each other's update.
//!
//! # Example
//!
//! ```no_run
//! use article_store::ArticleStore;
//! use news_core::Article;
//!
//! # async fn example() -> article_store::Result<()> {
//! let store = ArticleStore::open("./temp").await?;
//!
//! let store_lock = store.lock().await;
//! let mut queue = store_lock.load_queue().await;
//! queue.push(Article::new("https://example.com/a", "Hello"));
//! store_lock.save_queue(&queue).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
mod file;
pub mod history;

pub use error::{Result, StoreError};
pub use history::keep_most_recent;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use news_core::Article;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

/// File name of the pending queue.
pub const QUEUE_FILE: &str = "news_queue.json";

/// File name of the sent history.
pub const HISTORY_FILE: &str = "posted_news.json";

/// Default number of sent urls to remember.
pub const DEFAULT_HISTORY_CAP: usize = 1000;

/// Store sizes shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    /// Number of urls in the sent history.
    pub posted: usize,
    /// Number of articles waiting to be sent.
    pub queued: usize,
}

#[derive(Debug)]
struct StoreInner {
    queue_path: PathBuf,
    history_path: PathBuf,
    history_cap: usize,
    lock: Mutex<()>,
}

/// Handle to the article queue and sent history.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    inner: Arc<StoreInner>,
}

impl ArticleStore {
    /// Open the store in `dir` with the default history cap.
    ///
    /// Creates the directory and seeds both files with `[]` when missing.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_cap(dir, DEFAULT_HISTORY_CAP).await
    }

    /// Open the store with a custom history cap.
    pub async fn open_with_cap(dir: impl AsRef<Path>, history_cap: usize) -> Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;

        let queue_path = dir.join(QUEUE_FILE);
        let history_path = dir.join(HISTORY_FILE);
        file::seed_empty(&queue_path).await?;
        file::seed_empty(&history_path).await?;

        info!(dir = %dir.display(), history_cap, "Article store opened");

        Ok(Self {
            inner: Arc::new(StoreInner {
                queue_path,
                history_path,
                history_cap: history_cap.max(1),
                lock: Mutex::new(()),
            }),
        })
    }

    /// Acquire exclusive access for a read-modify-write span.
    pub async fn lock(&self) -> StoreLock<'_> {
        let guard = self.inner.lock.lock().await;
        StoreLock {
            inner: &self.inner,
            _guard: guard,
        }
    }

    /// Current queue and history sizes.
    pub async fn counts(&self) -> StoreCounts {
        let store = self.lock().await;
        StoreCounts {
            posted: store.load_history().await.len(),
            queued: store.load_queue().await.len(),
        }
    }

    /// Maximum number of urls kept in the sent history.
    pub fn history_cap(&self) -> usize {
        self.inner.history_cap
    }

    /// Path of the queue file.
    pub fn queue_path(&self) -> &Path {
        &self.inner.queue_path
    }

    /// Path of the history file.
    pub fn history_path(&self) -> &Path {
        &self.inner.history_path
    }
}

/// Exclusive access to the store, released on drop.
pub struct StoreLock<'a> {
    inner: &'a StoreInner,
    _guard: MutexGuard<'a, ()>,
}

impl StoreLock<'_> {
    /// Load the pending queue. Missing or corrupt files load as empty.
    pub async fn load_queue(&self) -> Vec<Article> {
        file::read_or_empty(&self.inner.queue_path).await
    }

    /// Overwrite the pending queue.
    pub async fn save_queue(&self, queue: &[Article]) -> Result<()> {
        file::write_atomic(&self.inner.queue_path, queue).await
    }

    /// Load the sent history. Missing or corrupt files load as empty.
    pub async fn load_history(&self) -> Vec<String> {
        file::read_or_empty(&self.inner.history_path).await
    }

    /// Overwrite the sent history.
    pub async fn save_history(&self, history: &[String]) -> Result<()> {
        file::write_atomic(&self.inner.history_path, history).await
    }

    /// Append a sent url, trim to the history cap and persist.
    ///
    /// Returns the history as written.
    pub async fn append_history(&self, url: &str) -> Result<Vec<String>> {
        let mut history = self.load_history().await;
        history::push_capped(&mut history, url.to_string(), self.inner.history_cap);
        self.save_history(&history).await?;
        Ok(history)
    }
}
