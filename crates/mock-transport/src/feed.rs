//! Static feed - returns whatever batch the test configured.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use news_core::{Article, FeedError, NewsFeed};

/// A feed that returns a fixed batch of articles, or a fixed error.
#[derive(Clone)]
pub struct StaticFeed {
    response: Arc<Mutex<Result<Vec<Article>, String>>>,
    fetches: Arc<AtomicUsize>,
}

impl StaticFeed {
    /// A feed that returns no articles.
    pub fn new() -> Self {
        Self::with_articles(Vec::new())
    }

    /// A feed that returns the given articles.
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(articles))),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the batch returned by later fetches.
    pub fn set_articles(&self, articles: Vec<Article>) {
        self.set_response(Ok(articles));
    }

    /// Make later fetches fail with a request error.
    pub fn set_error(&self, message: impl Into<String>) {
        self.set_response(Err(message.into()));
    }

    /// Number of fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn set_response(&self, response: Result<Vec<Article>, String>) {
        let mut slot = self.response.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = response;
    }
}

impl Default for StaticFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsFeed for StaticFeed {
    async fn fetch(&self) -> Result<Vec<Article>, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let response = self.response.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        response.clone().map_err(FeedError::Request)
    }

    fn name(&self) -> &str {
        "StaticFeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_articles() {
        let feed = StaticFeed::with_articles(vec![Article::new("http://a", "A")]);
        let articles = feed.fetch().await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(feed.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_error_then_recover() {
        let feed = StaticFeed::new();
        feed.set_error("offline");
        assert!(matches!(feed.fetch().await, Err(FeedError::Request(_))));

        feed.set_articles(vec![Article::new("http://b", "B")]);
        assert_eq!(feed.fetch().await.unwrap()[0].url, "http://b");
        assert_eq!(feed.fetch_count(), 2);
    }
}
