//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness of the web process. Says nothing about the Signal session.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: broadcaster::version(),
    })
}
