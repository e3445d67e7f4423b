use axum::{extract::State, Json};
use serde::Serialize;

use crate::agent::ANTHROPIC_VERSION;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sdk_version: &'static str,
    pub uptime_seconds: u64,
    pub environment: &'static str,
}

/// GET /health
/// Always 200 while the process is reachable.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sdk_version: ANTHROPIC_VERSION,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        environment: state.config.environment(),
    })
}
