pub mod analyze;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/v1/analyze-cv", post(analyze::analyze_cv_handler))
        // Above the 10MB file limit so our own 413 (with error code) fires
        // instead of the transport default
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
        .with_state(state)
}
