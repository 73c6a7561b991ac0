//! Posting queued articles.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::format::{render_post, TEST_MESSAGE};
use crate::state::ConnectionStatus;
use crate::NewsBot;

/// Result of one post attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// Paused, not connected, or nothing queued.
    Skipped,
    /// The article was delivered and recorded in the history.
    Sent { url: String },
    /// Delivery failed and the article went back to the head of the queue.
    Requeued { url: String },
}

impl NewsBot {
    /// Send the oldest queued article.
    ///
    /// The store lock is only held to read the head and to commit the
    /// result, never across the send. The article stays in the queue file
    /// until the send resolves, so a scan running meanwhile cannot re-add it.
    pub async fn post_next(&self) -> PostOutcome {
        let _posting = self.inner.posting.lock().await;

        if !self.inner.state.read().await.can_post() {
            debug!("Post skipped, bot idle");
            return PostOutcome::Skipped;
        }

        let head = {
            let store = self.inner.store.lock().await;
            store.load_queue().await.into_iter().next()
        };
        let Some(article) = head else {
            debug!("Post skipped, queue empty");
            return PostOutcome::Skipped;
        };

        let text = render_post(&article);
        let destination = &self.inner.config.destination;
        let sent = self.inner.transport.send_text(destination, &text).await;

        let store = self.inner.store.lock().await;
        let mut queue = store.load_queue().await;
        match sent {
            Ok(()) => {
                if let Some(pos) = queue.iter().position(|a| a.url == article.url) {
                    queue.remove(pos);
                }
                if let Err(e) = store.append_history(&article.url).await {
                    warn!(url = %article.url, error = %e, "Failed to record posted article");
                }
                if let Err(e) = store.save_queue(&queue).await {
                    warn!(error = %e, "Failed to save queue after post");
                }
                info!(url = %article.url, remaining = queue.len(), "Article posted");
                PostOutcome::Sent { url: article.url }
            }
            Err(e) => {
                warn!(url = %article.url, error = %e, "Send failed, requeueing");
                let url = article.url.clone();
                match queue.iter().position(|a| a.url == url) {
                    Some(0) => {}
                    Some(pos) => {
                        let article = queue.remove(pos);
                        queue.insert(0, article);
                    }
                    None => queue.insert(0, article),
                }
                if let Err(e) = store.save_queue(&queue).await {
                    warn!(error = %e, "Failed to save queue after requeue");
                }
                PostOutcome::Requeued { url }
            }
        }
    }

    /// Send the diagnostic message to the destination.
    pub async fn send_test_message(&self) -> Result<()> {
        if self.status().await != ConnectionStatus::Active {
            return Err(Error::NotConnected);
        }

        self.inner
            .transport
            .send_text(&self.inner.config.destination, TEST_MESSAGE)
            .await?;
        info!("Test message sent");
        Ok(())
    }
}
