//! Dashboard routes.

use std::time::Duration;

use askama::Template;
use axum::extract::State;
use axum::Json;
use broadcaster::{ConnectionStatus, StatusSnapshot};
use serde::Serialize;

use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub status: &'static str,
    pub active_status: bool,
    pub qr: Option<String>,
    pub posted: usize,
    pub queued: usize,
    pub interval: u64,
    pub is_active: bool,
}

impl From<StatusSnapshot> for DashboardTemplate {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            status: snapshot.status.as_str(),
            active_status: snapshot.status == ConnectionStatus::Active,
            qr: snapshot.pairing_image,
            posted: snapshot.posted,
            queued: snapshot.queued,
            interval: whole_secs(snapshot.post_interval),
            is_active: snapshot.is_active,
        }
    }
}

/// Dashboard statistics.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub posted: usize,
    pub queue: usize,
    pub status: &'static str,
    pub is_bot_active: bool,
    pub qr: Option<String>,
    /// Post interval in whole seconds.
    pub interval: u64,
}

impl From<StatusSnapshot> for Stats {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            posted: snapshot.posted,
            queue: snapshot.queued,
            status: snapshot.status.as_str(),
            is_bot_active: snapshot.is_active,
            qr: snapshot.pairing_image,
            interval: whole_secs(snapshot.post_interval),
        }
    }
}

/// Intervals may be fractional; the wire format carries whole seconds.
fn whole_secs(interval: Duration) -> u64 {
    interval.as_secs_f64().round() as u64
}

/// Render the dashboard page.
pub async fn dashboard_page(State(state): State<AppState>) -> DashboardTemplate {
    state.bot.snapshot().await.into()
}

/// Get dashboard statistics as JSON.
pub async fn stats_api(State(state): State<AppState>) -> Json<Stats> {
    Json(state.bot.snapshot().await.into())
}
