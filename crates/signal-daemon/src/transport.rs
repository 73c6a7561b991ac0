//! [`Transport`] implementation backed by a signal-cli daemon.
//!
//! A session is a linked Signal device:
//!
//! - With saved credentials, the session opens as soon as the daemon lists
//!   the account. An account the daemon no longer knows closes the session
//!   as logged out.
//! - Without credentials, `startLink` produces the pairing URI and
//!   `finishLink` waits for the primary device to scan it.
//!
//! While open, a monitor polls `listAccounts` and reports a close when the
//! daemon becomes unreachable or the account disappears.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use news_core::{CloseReason, Transport, TransportError, TransportEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::SignalClient;
use crate::error::DaemonError;
use crate::session::{SessionCredentials, SessionFile};
use crate::types::SendParams;

/// Tuning for [`SignalTransport`].
#[derive(Debug, Clone)]
pub struct SignalTransportConfig {
    /// Device name shown on the primary phone after linking.
    pub device_name: String,
    /// How often an open session checks the daemon.
    pub monitor_interval: Duration,
    /// How long to wait for the pairing code to be scanned.
    pub link_timeout: Duration,
}

impl Default for SignalTransportConfig {
    fn default() -> Self {
        Self {
            device_name: "Watchdog Pro".to_string(),
            monitor_interval: Duration::from_secs(30),
            link_timeout: Duration::from_secs(300),
        }
    }
}

/// State shared between the transport and its session task.
#[derive(Clone)]
struct SessionContext {
    client: SignalClient,
    session_file: SessionFile,
    config: SignalTransportConfig,
    account: Arc<Mutex<Option<String>>>,
}

impl SessionContext {
    fn account(&self) -> Option<String> {
        self.account.lock().ok().and_then(|a| a.clone())
    }

    fn set_account(&self, account: Option<String>) {
        if let Ok(mut guard) = self.account.lock() {
            *guard = account;
        }
    }
}

struct TransportInner {
    context: SessionContext,
    session_task: Mutex<Option<JoinHandle<()>>>,
}

impl TransportInner {
    fn replace_task(&self, task: Option<JoinHandle<()>>) {
        if let Ok(mut slot) = self.session_task.lock() {
            if let Some(previous) = std::mem::replace(&mut *slot, task) {
                previous.abort();
            }
        }
    }
}

impl Drop for TransportInner {
    fn drop(&mut self) {
        self.replace_task(None);
    }
}

/// Messaging transport that broadcasts through a linked Signal device.
#[derive(Clone)]
pub struct SignalTransport {
    inner: Arc<TransportInner>,
}

impl SignalTransport {
    /// Create a transport with default tuning.
    pub fn new(client: SignalClient, session_file: SessionFile) -> Self {
        Self::with_config(client, session_file, SignalTransportConfig::default())
    }

    /// Create a transport with custom tuning.
    pub fn with_config(
        client: SignalClient,
        session_file: SessionFile,
        config: SignalTransportConfig,
    ) -> Self {
        Self {
            inner: Arc::new(TransportInner {
                context: SessionContext {
                    client,
                    session_file,
                    config,
                    account: Arc::new(Mutex::new(None)),
                },
                session_task: Mutex::new(None),
            }),
        }
    }

    /// The linked account, once known.
    pub fn account(&self) -> Option<String> {
        self.inner.context.account()
    }

    /// Get the underlying SignalClient.
    pub fn client(&self) -> &SignalClient {
        &self.inner.context.client
    }
}

impl std::fmt::Debug for SignalTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalTransport")
            .field("client", &self.inner.context.client)
            .field("account", &self.account())
            .finish()
    }
}

#[async_trait]
impl Transport for SignalTransport {
    async fn start(&self) -> Result<mpsc::Receiver<TransportEvent>, TransportError> {
        let (tx, rx) = mpsc::channel(16);
        let context = self.inner.context.clone();

        let task = tokio::spawn(async move {
            let reason = match open_session(&context, &tx).await {
                Ok(true) => match monitor_session(&context, &tx).await {
                    Some(reason) => reason,
                    None => return,
                },
                Ok(false) => return,
                Err(reason) => reason,
            };
            let _ = tx.send(TransportEvent::Closed(reason)).await;
        });

        self.inner.replace_task(Some(task));
        Ok(rx)
    }

    async fn send_text(&self, destination: &str, text: &str) -> Result<(), TransportError> {
        let account = self.account().ok_or(TransportError::NotConnected)?;
        let params = SendParams::group(destination, text).with_account(account);

        let result = self
            .inner
            .context
            .client
            .send(params)
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        if result.all_failed() {
            return Err(TransportError::Send(
                DaemonError::SendFailed(format!("no recipient accepted message {}", result.timestamp))
                    .to_string(),
            ));
        }

        debug!(destination = %destination, timestamp = result.timestamp, "Message sent");
        Ok(())
    }

    async fn save_credentials(&self) -> Result<(), TransportError> {
        let account = self
            .account()
            .ok_or_else(|| TransportError::Credentials("no linked account".to_string()))?;

        self.inner
            .context
            .session_file
            .save(&SessionCredentials { account })
            .await
            .map_err(|e| TransportError::Credentials(e.to_string()))
    }

    async fn clear_credentials(&self) -> Result<(), TransportError> {
        let context = &self.inner.context;
        let account = context.account();
        context.set_account(None);

        if let Some(account) = account {
            if let Err(e) = context.client.delete_local_account_data(&account).await {
                warn!(account = %account, error = %e, "Failed to delete local account data");
            }
        }

        context
            .session_file
            .clear()
            .await
            .map_err(|e| TransportError::Credentials(e.to_string()))
    }

    fn name(&self) -> &str {
        "SignalTransport"
    }
}

/// Resume or link a session. Returns `Ok(false)` once nobody is listening.
async fn open_session(
    context: &SessionContext,
    tx: &mpsc::Sender<TransportEvent>,
) -> Result<bool, CloseReason> {
    let saved = match context.account() {
        Some(account) => Some(account),
        None => context.session_file.load().await.map(|c| c.account),
    };

    if let Some(account) = saved {
        let accounts = context.client.list_accounts().await.map_err(transient)?;
        if !accounts.contains(&account) {
            warn!(account = %account, "Saved account is not registered with the daemon");
            return Err(CloseReason::logged_out());
        }

        info!(account = %account, "Resumed Signal session");
        context.set_account(Some(account));
        return Ok(tx.send(TransportEvent::Opened).await.is_ok());
    }

    let uri = context.client.start_link().await.map_err(transient)?;
    info!("Device link started, waiting for scan");
    if tx.send(TransportEvent::PairingIssued(uri.clone())).await.is_err() {
        return Ok(false);
    }

    let account = context
        .client
        .finish_link(&uri, &context.config.device_name, context.config.link_timeout)
        .await
        .map_err(transient)?;

    info!(account = %account, "Device linked");
    context.set_account(Some(account));

    if tx.send(TransportEvent::CredentialsUpdated).await.is_err() {
        return Ok(false);
    }
    Ok(tx.send(TransportEvent::Opened).await.is_ok())
}

/// Poll the daemon until the session breaks. `None` once nobody is listening.
async fn monitor_session(
    context: &SessionContext,
    tx: &mpsc::Sender<TransportEvent>,
) -> Option<CloseReason> {
    let mut ticker = interval(context.config.monitor_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = tx.closed() => return None,
            _ = ticker.tick() => {}
        }

        let Some(account) = context.account() else {
            return Some(CloseReason::logged_out());
        };

        match context.client.list_accounts().await {
            Ok(accounts) if accounts.contains(&account) => {
                debug!(account = %account, "Session healthy");
            }
            Ok(_) => {
                warn!(account = %account, "Account no longer registered with the daemon");
                return Some(CloseReason::logged_out());
            }
            Err(e) => return Some(transient(e)),
        }
    }
}

fn transient(err: DaemonError) -> CloseReason {
    CloseReason::transient(err.to_string())
}
