//! VirusTotal API client
//!
//! Thin wrapper over the VirusTotal v3 REST API: GET lookups for known
//! artifacts and multipart POST for file scans. Every call is attempted
//! exactly once; failures are classified, never retried.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::models::ScanTarget;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("scanner returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse scanner response: {0}")]
    Parse(String),
}

/// Client for the threat-intelligence scanner.
#[derive(Debug, Clone)]
pub struct VirusTotalClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VirusTotalClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build scanner HTTP client, using default: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Look up an already-known artifact (hash, URL, IP, or domain).
    pub async fn lookup(&self, target: &ScanTarget) -> Result<Value, ScanError> {
        let endpoint = format!("{}/{}", self.base_url, target.resource_path());

        tracing::debug!(endpoint = %endpoint, "Fetching scan report");

        let response = self
            .client
            .get(&endpoint)
            .header("x-apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| ScanError::Http(e.to_string()))?;

        Self::parse_response(response).await
    }

    /// Upload file bytes for scanning. The scanner expects a multipart body
    /// with the content under a field named "file".
    pub async fn scan_file(&self, filename: String, data: Vec<u8>) -> Result<Value, ScanError> {
        let endpoint = format!("{}/files", self.base_url);

        tracing::debug!(
            endpoint = %endpoint,
            filename = %filename,
            size = data.len(),
            "Uploading file for scanning"
        );

        let part = reqwest::multipart::Part::bytes(data).file_name(filename);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&endpoint)
            .header("x-apikey", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ScanError::Http(e.to_string()))?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: reqwest::Response) -> Result<Value, ScanError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Scanner returned an error");
            return Err(ScanError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ScanError::Parse(e.to_string()))
    }
}
