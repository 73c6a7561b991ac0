//! Signal-cli daemon HTTP client.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DaemonConfig;
use crate::error::DaemonError;
use crate::types::{
    AccountEntry, DeleteLocalDataParams, FinishLinkParams, FinishLinkResult, SendParams,
    SendResult, StartLinkResult,
};

/// Default timeout for RPC calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Serialize)]
struct RpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<T>,
    id: u64,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i32,
    message: String,
}

/// Client for communicating with the signal-cli daemon.
#[derive(Clone)]
pub struct SignalClient {
    http: Client,
    config: DaemonConfig,
    request_id: Arc<AtomicU64>,
    connected: Arc<AtomicBool>,
}

impl SignalClient {
    /// Create a client without contacting the daemon.
    pub fn new(config: DaemonConfig) -> Result<Self, DaemonError> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(DaemonError::Http)?;

        Ok(Self {
            http,
            config,
            request_id: Arc::new(AtomicU64::new(1)),
            connected: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a client and verify the daemon answers its health check.
    pub async fn connect(config: DaemonConfig) -> Result<Self, DaemonError> {
        let client = Self::new(config)?;

        if client.health_check().await? {
            info!("Connected to signal-cli daemon at {}", client.config.base_url);
        } else {
            return Err(DaemonError::HealthCheckFailed);
        }

        Ok(client)
    }

    /// Whether the last health check or RPC call reached the daemon.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Perform a health check against the daemon.
    pub async fn health_check(&self) -> Result<bool, DaemonError> {
        let url = self.config.check_url();
        debug!("Health check: {}", url);

        match self.http.get(&url).send().await {
            Ok(resp) => {
                let ok = resp.status().is_success();
                self.connected.store(ok, Ordering::SeqCst);
                Ok(ok)
            }
            Err(e) => {
                self.connected.store(false, Ordering::SeqCst);
                Err(DaemonError::Http(e))
            }
        }
    }

    /// Send a message using the full SendParams structure.
    pub async fn send(&self, mut params: SendParams) -> Result<SendResult, DaemonError> {
        // Add account if configured and not already set
        if params.account.is_none() {
            params.account = self.config.account.clone();
        }

        self.rpc_call("send", Some(params), None).await
    }

    /// Begin linking a new device. Returns the `sgnl://linkdevice` URI to show as a QR code.
    pub async fn start_link(&self) -> Result<String, DaemonError> {
        let resp: StartLinkResult = self.rpc_call::<(), _>("startLink", None, None).await?;
        Ok(resp.device_link_uri)
    }

    /// Wait for the primary device to scan the link URI.
    ///
    /// Blocks until the link completes or `timeout` elapses. Returns the
    /// linked account number.
    pub async fn finish_link(
        &self,
        device_link_uri: &str,
        device_name: &str,
        timeout: Duration,
    ) -> Result<String, DaemonError> {
        let params = FinishLinkParams {
            device_link_uri: device_link_uri.to_string(),
            device_name: device_name.to_string(),
        };
        let resp: FinishLinkResult = self.rpc_call("finishLink", Some(params), Some(timeout)).await?;
        Ok(resp.number)
    }

    /// List the accounts registered with the daemon.
    pub async fn list_accounts(&self) -> Result<Vec<String>, DaemonError> {
        let accounts: Vec<AccountEntry> = self.rpc_call::<(), _>("listAccounts", None, None).await?;
        Ok(accounts.into_iter().map(|a| a.number).collect())
    }

    /// Remove the daemon's local data for an account.
    pub async fn delete_local_account_data(&self, account: &str) -> Result<(), DaemonError> {
        let params = DeleteLocalDataParams {
            account: account.to_string(),
            ignore_registered: true,
        };
        self.rpc_call_unit("deleteLocalAccountData", Some(params)).await
    }

    /// Get the configuration.
    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    /// Make a JSON-RPC call that must return a result.
    async fn rpc_call<P: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: Option<P>,
        timeout: Option<Duration>,
    ) -> Result<R, DaemonError> {
        let response: RpcResponse<R> = self.rpc_request(method, params, timeout).await?;

        response.result.ok_or_else(|| DaemonError::Rpc {
            code: -1,
            message: "No result in response".to_string(),
        })
    }

    /// Make a JSON-RPC call whose result is ignored.
    async fn rpc_call_unit<P: Serialize>(&self, method: &str, params: Option<P>) -> Result<(), DaemonError> {
        let _: RpcResponse<serde_json::Value> = self.rpc_request(method, params, None).await?;
        Ok(())
    }

    async fn rpc_request<P: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: Option<P>,
        timeout: Option<Duration>,
    ) -> Result<RpcResponse<R>, DaemonError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let url = self.config.rpc_url();

        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        debug!("RPC call: {} (id={})", method, id);

        let mut builder = self.http.post(&url).json(&request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            self.connected.store(false, Ordering::SeqCst);
            DaemonError::Http(e)
        })?;
        self.connected.store(true, Ordering::SeqCst);

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DaemonError::Connection(format!("HTTP {}: {}", status, body)));
        }

        let rpc_response: RpcResponse<R> = response.json().await.map_err(DaemonError::Http)?;

        if let Some(error) = &rpc_response.error {
            return Err(DaemonError::Rpc {
                code: error.code,
                message: error.message.clone(),
            });
        }

        Ok(rpc_response)
    }
}

impl std::fmt::Debug for SignalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalClient")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .finish()
    }
}
