//! GET /health

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    ai: &'static str,
}

/// Health check endpoint.
///
/// The converter has no backing services beyond the optional AI, so a
/// running process is a healthy one; the body reports uptime and
/// whether AI extraction is available.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        ai: if state.generator.has_ai() {
            "configured"
        } else {
            "disabled"
        },
    })
}
