//! Liveness endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Root welcome text - confirms the service is up
async fn root() -> &'static str {
    "Welcome to the Chime voice assistant gateway"
}

/// Liveness probe - is the service running?
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build health router (no state needed)
pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
