//! Mock collaborators for testing the newsroom broadcaster.
//!
//! This crate provides in-memory implementations of the `news-core` traits:
//! - `MockTransport` - Scripted session events, recorded sends, injectable failures, held sends
//! - `StaticFeed` - Returns a configurable batch of articles or an error
//!
//! # Example
//!
//! ```rust
//! use mock_transport::{MockTransport, Transport, TransportEvent};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = MockTransport::new();
//!     transport.script_session(vec![TransportEvent::Opened]);
//!
//!     let mut events = transport.start().await.unwrap();
//!     assert_eq!(events.recv().await, Some(TransportEvent::Opened));
//!
//!     transport.send_text("GROUP", "hello").await.unwrap();
//!     assert_eq!(transport.sent().len(), 1);
//! }
//! ```

mod feed;
mod transport;

// Re-export news-core types for convenience
pub use news_core::{
    async_trait, Article, CloseReason, FeedError, NewsFeed, Transport, TransportError,
    TransportEvent,
};

pub use feed::StaticFeed;
pub use transport::{MockTransport, SentMessage};
