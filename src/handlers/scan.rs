//! Lookup scan and free-text completion handlers

use axum::{extract::State, Json};

use crate::clients::openai::lookup_prompt;
use crate::models::{CompletionRequest, CompletionResponse, ScanRequest, SummaryResponse};
use crate::{AppError, AppResult, AppState};

/// Scan an already-known artifact (hash, URL, IP, or domain) and summarize
/// the report.
pub async fn vt_scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> AppResult<Json<SummaryResponse>> {
    let target = req
        .resolve()
        .ok_or_else(|| AppError::InvalidRequest("No valid parameter provided".to_string()))?;

    let result = state.scanner.lookup(&target).await.map_err(|e| {
        AppError::ScanFailed(format!("Error fetching VirusTotal scan result: {}", e))
    })?;

    let prompt = lookup_prompt(&result.to_string());
    let summary = state.summarizer.complete(&prompt).await.map_err(|e| {
        AppError::SummarizeFailed(format!("Error summarizing scan result: {}", e))
    })?;

    tracing::info!(scan_target = ?target, "Scan summarized");

    Ok(Json(SummaryResponse { summary }))
}

/// Run a raw completion over user-provided text.
pub async fn gpt(
    State(state): State<AppState>,
    Json(req): Json<CompletionRequest>,
) -> AppResult<Json<CompletionResponse>> {
    let result = state.summarizer.complete(&req.text).await.map_err(|e| {
        AppError::SummarizeFailed(format!("Error generating completion: {}", e))
    })?;

    Ok(Json(CompletionResponse { result }))
}
