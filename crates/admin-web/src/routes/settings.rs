//! Settings and diagnostic routes.

use axum::extract::State;
use axum::Json;
use broadcaster::SettingsUpdate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::state::AppState;

/// Body of `POST /api/settings`.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsRequest {
    /// Post interval in seconds.
    pub interval: Option<f64>,
    /// Enable or pause the bot.
    pub toggle: Option<bool>,
}

/// Outcome of an operator action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Change the post interval or toggle the bot.
pub async fn settings_api(
    State(state): State<AppState>,
    Json(req): Json<SettingsRequest>,
) -> Result<Json<ActionResponse>> {
    let update = SettingsUpdate {
        interval_secs: req.interval,
        is_active: req.toggle,
    };
    state.bot.apply_settings(update).await?;
    Ok(Json(ActionResponse::ok()))
}

/// Send the diagnostic message.
pub async fn test_api(State(state): State<AppState>) -> Json<ActionResponse> {
    match state.bot.send_test_message().await {
        Ok(()) => {
            info!("Test post requested");
            Json(ActionResponse::ok())
        }
        Err(err) => {
            warn!(error = %err, "Test post failed");
            Json(ActionResponse::failed(err))
        }
    }
}
