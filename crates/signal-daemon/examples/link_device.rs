//! Link this machine as a Signal device and list the daemon's accounts.
//!
//! Run with: cargo run --example link_device
//!
//! Set SIGNAL_DAEMON_URL to point at a running `signal-cli daemon --http`.

use std::env;
use std::time::Duration;

use signal_daemon::{DaemonConfig, SignalClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let url = env::var("SIGNAL_DAEMON_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    println!("Connecting to {}...", url);
    let client = SignalClient::connect(DaemonConfig::new(url)).await?;

    let accounts = client.list_accounts().await?;
    println!("Registered accounts: {:?}", accounts);

    let uri = client.start_link().await?;
    println!("Scan this link from Signal > Settings > Linked devices:\n{}", uri);

    let number = client
        .finish_link(&uri, "newsroom example", Duration::from_secs(300))
        .await?;
    println!("Linked account {}", number);

    Ok(())
}
