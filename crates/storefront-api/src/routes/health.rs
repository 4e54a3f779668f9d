//! Liveness endpoint for load balancers and uptime checks.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Payload returned by the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is accepting requests.
    pub status: &'static str,
    /// Package name of the responding service.
    pub service: &'static str,
    /// Package version baked in at build time.
    pub version: &'static str,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Returns the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
