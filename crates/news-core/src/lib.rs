//! Core traits and types for the newsroom broadcaster.
//!
//! This crate provides the shared interface between the bot and its
//! collaborators. It defines:
//!
//! - [`Article`] - A news item as delivered by a feed
//! - [`Transport`] - The messaging session the bot broadcasts through
//! - [`TransportEvent`] - Connection-state changes reported by a transport
//! - [`NewsFeed`] - A source of candidate articles
//!
//! # Example
//!
//! ```rust
//! use news_core::{async_trait, Article, FeedError, NewsFeed};
//!
//! struct OneArticle;
//!
//! #[async_trait]
//! impl NewsFeed for OneArticle {
//!     async fn fetch(&self) -> Result<Vec<Article>, FeedError> {
//!         Ok(vec![Article::new("https://example.com/a", "Hello")])
//!     }
//!
//!     fn name(&self) -> &str {
//!         "OneArticle"
//!     }
//! }
//! ```

mod article;
mod error;
mod feed;
mod transport;

pub use article::{Article, ArticleSource};
pub use error::{FeedError, TransportError};
pub use feed::NewsFeed;
pub use transport::{CloseReason, Transport, TransportEvent, LOGGED_OUT_STATUS};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
