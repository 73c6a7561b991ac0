//! Types for sending messages via signal-cli daemon.

use serde::{Deserialize, Serialize};

/// Parameters for sending a message.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendParams {
    /// Group IDs to send to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_id: Vec<String>,

    /// The message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Account to send from (multi-account mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl SendParams {
    /// Create new send params for a text message to a group.
    pub fn group(group_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            group_id: vec![group_id.into()],
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Set the account for multi-account mode.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

/// Result of sending a message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    /// Timestamp of the sent message.
    pub timestamp: u64,

    /// Results per recipient (if available).
    #[serde(default)]
    pub results: Vec<RecipientResult>,
}

impl SendResult {
    /// Whether the daemon reported at least one recipient and none succeeded.
    pub fn all_failed(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| !r.is_success())
    }
}

/// Result for a specific recipient.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientResult {
    /// Delivery outcome, e.g. `SUCCESS` or `UNREGISTERED_FAILURE`.
    #[serde(rename = "type", default)]
    pub result_type: Option<String>,
}

impl RecipientResult {
    /// Whether delivery to this recipient succeeded.
    pub fn is_success(&self) -> bool {
        self.result_type.as_deref().map_or(true, |t| t == "SUCCESS")
    }
}
