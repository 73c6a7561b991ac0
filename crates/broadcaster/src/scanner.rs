//! Feed scanning and queue merging.

use std::collections::HashSet;

use article_store::keep_most_recent;
use news_core::Article;
use tracing::{debug, info, warn};

use crate::NewsBot;

/// Result of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The bot is paused or not connected.
    Skipped,
    /// The feed or the store failed; the queue is unchanged.
    Failed,
    /// This many new articles were queued.
    Added(usize),
}

/// Append fetched articles that are in neither the history nor the queue.
///
/// Feed order is kept, duplicates inside the batch are dropped and
/// articles without a url are ignored. Returns the number appended.
pub fn merge_unseen(queue: &mut Vec<Article>, history: &[String], fetched: Vec<Article>) -> usize {
    let mut seen: HashSet<String> = history.iter().cloned().collect();
    seen.extend(queue.iter().map(|a| a.url.clone()));

    let before = queue.len();
    for article in fetched {
        if article.has_url() && seen.insert(article.url.clone()) {
            queue.push(article);
        }
    }
    queue.len() - before
}

impl NewsBot {
    /// Fetch the feed and queue every article not seen before.
    pub async fn scan(&self) -> ScanOutcome {
        if !self.inner.state.read().await.can_scan() {
            debug!("Scan skipped, bot idle");
            return ScanOutcome::Skipped;
        }

        let fetched = match self.inner.feed.fetch().await {
            Ok(articles) => articles,
            Err(e) => {
                warn!(feed = self.inner.feed.name(), error = %e, "Feed fetch failed");
                return ScanOutcome::Failed;
            }
        };
        let fetched_count = fetched.len();

        let store = self.inner.store.lock().await;
        let history = store.load_history().await;
        let mut queue = store.load_queue().await;

        let added = merge_unseen(&mut queue, &history, fetched);
        if added == 0 {
            debug!(fetched = fetched_count, "No new articles");
            return ScanOutcome::Added(0);
        }

        keep_most_recent(&mut queue, self.inner.config.queue_cap);
        if let Err(e) = store.save_queue(&queue).await {
            warn!(error = %e, "Failed to save queue after scan");
            return ScanOutcome::Failed;
        }

        info!(
            fetched = fetched_count,
            added,
            queued = queue.len(),
            "Queued new articles"
        );
        ScanOutcome::Added(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(queue: &[Article]) -> Vec<&str> {
        queue.iter().map(|a| a.url.as_str()).collect()
    }

    #[test]
    fn test_merge_skips_known_urls() {
        let mut queue = vec![Article::new("http://b", "B")];
        let history = vec!["http://x".to_string()];
        let fetched = vec![
            Article::new("http://a", "A"),
            Article::new("http://b", "B again"),
            Article::new("http://x", "X"),
        ];

        assert_eq!(merge_unseen(&mut queue, &history, fetched), 1);
        assert_eq!(urls(&queue), vec!["http://b", "http://a"]);
    }

    #[test]
    fn test_merge_dedupes_within_batch() {
        let mut queue = Vec::new();
        let fetched = vec![
            Article::new("http://a", "first"),
            Article::new("http://a", "second"),
        ];

        assert_eq!(merge_unseen(&mut queue, &[], fetched), 1);
        assert_eq!(queue[0].title, "first");
    }

    #[test]
    fn test_merge_ignores_missing_url() {
        let mut queue = Vec::new();
        let fetched = vec![Article::new("", "no url"), Article::new("  ", "blank")];

        assert_eq!(merge_unseen(&mut queue, &[], fetched), 0);
        assert!(queue.is_empty());
    }
}
