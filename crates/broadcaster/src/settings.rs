//! Operator settings and their validation.

use std::time::Duration;

use thiserror::Error;

/// Shortest accepted post interval, in seconds.
pub const MIN_INTERVAL_SECS: f64 = 1.0;

/// Longest accepted post interval, in seconds.
pub const MAX_INTERVAL_SECS: f64 = 86_400.0;

/// Rejected settings input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("interval must be a finite number of seconds")]
    NotFinite,

    #[error("interval must be at least 1 second, got {0}")]
    TooShort(f64),

    #[error("interval must be at most 86400 seconds, got {0}")]
    TooLong(f64),
}

/// A partial settings change. Absent fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsUpdate {
    /// New post interval in seconds.
    pub interval_secs: Option<f64>,
    /// New value for the kill-switch.
    pub is_active: Option<bool>,
}

impl SettingsUpdate {
    /// Validate the update into concrete values.
    pub fn validate(&self) -> Result<ValidSettings, SettingsError> {
        let post_interval = self.interval_secs.map(interval_from_secs).transpose()?;
        Ok(ValidSettings {
            post_interval,
            is_active: self.is_active,
        })
    }
}

/// A settings change that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidSettings {
    pub post_interval: Option<Duration>,
    pub is_active: Option<bool>,
}

/// Convert an interval in seconds, rounded to the millisecond.
pub fn interval_from_secs(secs: f64) -> Result<Duration, SettingsError> {
    if !secs.is_finite() {
        return Err(SettingsError::NotFinite);
    }
    if secs < MIN_INTERVAL_SECS {
        return Err(SettingsError::TooShort(secs));
    }
    if secs > MAX_INTERVAL_SECS {
        return Err(SettingsError::TooLong(secs));
    }
    Ok(Duration::from_millis((secs * 1000.0).round() as u64))
}
