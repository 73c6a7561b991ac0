//! Types for device linking and account management.

use serde::{Deserialize, Serialize};

/// Result of `startLink`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLinkResult {
    /// URI to encode as a QR code for the primary device.
    pub device_link_uri: String,
}

/// Parameters for `finishLink`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishLinkParams {
    pub device_link_uri: String,
    pub device_name: String,
}

/// Result of `finishLink`.
#[derive(Debug, Clone, Deserialize)]
pub struct FinishLinkResult {
    /// Phone number of the linked account.
    pub number: String,
}

/// One entry of `listAccounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountEntry {
    pub number: String,
}

/// Parameters for `deleteLocalAccountData`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLocalDataParams {
    pub account: String,
    pub ignore_registered: bool,
}
