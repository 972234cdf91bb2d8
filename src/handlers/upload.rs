//! Upload relay handler
//!
//! Receives a multipart file upload, stages it on disk, and forwards the
//! bytes to the scanner. Every request stages into its own temporary
//! directory under the upload root, so concurrent uploads of the same
//! filename never share a path, and the directory is removed on every exit
//! path when the guard drops.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::clients::openai::file_scan_prompt;
use crate::models::SummaryResponse;
use crate::{AppError, AppResult, AppState};

const MAX_FILENAME_LENGTH: usize = 255;

/// Upload a file, scan it, and summarize the scan report.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<SummaryResponse>> {
    let (data, original_filename) = extract_multipart_file(multipart).await?;
    let filename = sanitize_filename(&original_filename)?;

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::Processing(format!("Error processing file: {}", e)))?;

    // Scoped staging directory: unique per request, deleted on drop
    let staging = tempfile::Builder::new()
        .prefix("upload-")
        .tempdir_in(&state.config.upload_dir)
        .map_err(|e| AppError::Processing(format!("Error processing file: {}", e)))?;
    let file_path = staging.path().join(&filename);

    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::Processing(format!("Error processing file: {}", e)))?;

    // Re-read from disk before forwarding, relaying exactly what was stored
    let stored = tokio::fs::read(&file_path)
        .await
        .map_err(|e| AppError::Processing(format!("Error processing file: {}", e)))?;

    tracing::info!(
        filename = %filename,
        size = stored.len(),
        "Relaying uploaded file to scanner"
    );

    let result = state
        .scanner
        .scan_file(filename, stored)
        .await
        .map_err(|e| {
            AppError::ScanFailed(format!("Error uploading and scanning file: {}", e))
        })?;

    let prompt = file_scan_prompt(&result.to_string());
    let summary = state.summarizer.complete(&prompt).await.map_err(|e| {
        AppError::SummarizeFailed(format!("Error summarizing scan result: {}", e))
    })?;

    Ok(Json(SummaryResponse { summary }))
}

/// Pull the file bytes and filename out of the multipart form. Exactly one
/// field named "file" is expected; an empty filename is rejected before
/// anything touches the filesystem or the network.
async fn extract_multipart_file(mut multipart: Multipart) -> Result<(Vec<u8>, String), AppError> {
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::InvalidRequest("No selected file".to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Failed to read file data: {}", e)))?;

        file = Some((data.to_vec(), filename));
    }

    file.ok_or_else(|| AppError::InvalidRequest("No selected file".to_string()))
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Strips any directory components and maps characters outside
/// [A-Za-z0-9.-_] to underscores. `file_name()` already drops trailing `..`
/// components, so an inner `..` (as in `archive..tar`) is an ordinary name.
fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    let basename = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if basename.is_empty() {
        return Err(AppError::InvalidRequest("No selected file".to_string()));
    }

    let sanitized: String = basename
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.chars().all(|c| c == '.' || c == '_') {
        return Err(AppError::InvalidRequest("No selected file".to_string()));
    }

    Ok(sanitized)
}
