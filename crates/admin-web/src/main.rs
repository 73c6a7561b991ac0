//! Newsroom bot: admin web interface and process entry point.
//!
//! Starts the news bot on a linked Signal device and serves the dashboard
//! that shows its status and controls posting.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use article_store::ArticleStore;
use broadcaster::NewsBot;
use news_feed::NewsApiClient;
use signal_daemon::{DaemonConfig, SessionFile, SignalClient, SignalTransport, SignalTransportConfig};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        data_dir = %config.data_dir.display(),
        version = broadcaster::version(),
        "Starting Watchdog Pro"
    );

    // Open the article store
    let store = ArticleStore::open_with_cap(&config.data_dir, config.history_cap).await?;

    // Signal transport; the daemon may come up later, sessions retry
    let client = SignalClient::new(DaemonConfig::new(&config.signal_daemon_url))?;
    let transport = SignalTransport::with_config(
        client,
        SessionFile::in_dir(&config.data_dir),
        SignalTransportConfig {
            device_name: config.device_name.clone(),
            ..SignalTransportConfig::default()
        },
    );

    let feed = NewsApiClient::new(config.news.clone())?;

    let bot = NewsBot::new(config.bot_config(), store, Arc::new(feed), Arc::new(transport));
    tokio::spawn({
        let bot = bot.clone();
        async move { bot.run().await }
    });

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(bot));

    // Start server
    info!(addr = %config.addr, "Admin web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
