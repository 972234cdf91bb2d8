//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// VirusTotal API base URL
    pub vt_api_url: String,

    /// VirusTotal API key
    pub vt_api_key: String,

    /// Summarizer API base URL (OpenAI-compatible)
    pub openai_api_url: String,

    /// Summarizer API key
    pub openai_api_key: String,

    /// Summarizer model name
    pub openai_model: String,

    /// Root directory for upload staging
    pub upload_dir: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// API keys default to empty strings: a missing credential is not a
    /// startup error, it surfaces as a 401 from the upstream service.
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            vt_api_url: env::var("VT_API_URL")
                .unwrap_or_else(|_| "https://www.virustotal.com/api/v3".to_string()),

            vt_api_key: env::var("VT_API_KEY").unwrap_or_default(),

            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),

            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),

            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),

            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
