//! Summarization client
//!
//! Sends raw scan output to an OpenAI-compatible chat-completions endpoint
//! and returns the model's prose summary. Failures are typed so the front
//! door can map them to a distinct HTTP status instead of disguising error
//! text as a summary.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("request failed: {0}")]
    Http(String),

    #[error("summarizer returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected summarizer response: {0}")]
    Parse(String),
}

/// Client for the language-model completion service.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Prompt for lookup results.
pub fn lookup_prompt(input: &str) -> String {
    format!(
        "Provide a cybersecurity-related summary for the following input:\n\n{}",
        input
    )
}

/// Prompt for file-scan results.
pub fn file_scan_prompt(result: &str) -> String {
    format!(
        "File Scan Result:\n{}\n\nProvide a cybersecurity-related analysis and summary.",
        result
    )
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!(
                    "Failed to build summarizer HTTP client, using default: {}",
                    e
                );
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Run one completion for the given prompt and return the message text.
    pub async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        let endpoint = format!("{}/chat/completions", self.base_url);

        let request_body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt,
                }
            ]
        });

        tracing::debug!(endpoint = %endpoint, model = %self.model, "Sending summarization request");

        let response = self
            .client
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummarizeError::Timeout(REQUEST_TIMEOUT_SECS)
                } else {
                    SummarizeError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Summarizer returned an error");
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| SummarizeError::Parse(e.to_string()))?;

        // Chat-completions response format: choices[0].message.content
        response_json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| SummarizeError::Parse(format!("no content in {}", response_json)))
    }
}
