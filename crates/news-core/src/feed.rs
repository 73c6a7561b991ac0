//! News feed trait.

use async_trait::async_trait;

use crate::article::Article;
use crate::error::FeedError;

/// A source of candidate articles.
///
/// Implementations return articles in the order the upstream provides them;
/// the scanner preserves that order when queueing.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// Fetch the current batch of articles.
    async fn fetch(&self) -> Result<Vec<Article>, FeedError>;

    /// Feed name for logs.
    fn name(&self) -> &str;
}
