//! Error handling
//!
//! Every component failure is converted to a JSON body at the front-door
//! boundary; nothing is allowed to crash the request-handling process.
//! Client errors use `{"detail": ...}` bodies, server-side failures use
//! `{"error": ...}`, matching the wire contract of the original API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// Request rejected before any external call (400, `detail` body)
    InvalidRequest(String),

    /// Scanner call failed: network error or non-2xx response (500)
    ScanFailed(String),

    /// Summarizer call failed (502)
    SummarizeFailed(String),

    /// Unexpected error while handling an uploaded file (500)
    Processing(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": msg })),
            )
                .into_response(),
            AppError::ScanFailed(msg) => {
                tracing::error!("Scan failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": msg })),
                )
                    .into_response()
            }
            AppError::SummarizeFailed(msg) => {
                tracing::error!("Summarization failed: {}", msg);
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Processing(msg) => {
                tracing::error!("Processing error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": msg })),
                )
                    .into_response()
            }
        }
    }
}
