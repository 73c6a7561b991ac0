//! Application state shared across handlers.

use broadcaster::NewsBot;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The running bot.
    pub bot: NewsBot,
}

impl AppState {
    /// Create new application state.
    pub fn new(bot: NewsBot) -> Self {
        Self { bot }
    }
}
