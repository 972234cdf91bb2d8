//! Health check handler
//!
//! Reports liveness plus whether the scanner and summarizer credentials are
//! configured, since a missing key is otherwise invisible until the first
//! upstream 401.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    scanner_configured: bool,
    summarizer_configured: bool,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "scanlens",
        version: env!("CARGO_PKG_VERSION"),
        scanner_configured: !state.config.vt_api_key.is_empty(),
        summarizer_configured: !state.config.openai_api_key.is_empty(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
