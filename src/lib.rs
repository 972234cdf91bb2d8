//! ScanLens — VirusTotal scan summarization backend
//!
//! Accepts a file, URL, IP address, domain, or file hash, forwards it to the
//! VirusTotal v3 API, and asks a chat-completions service for a
//! human-readable cybersecurity summary of the scan result.
//!
//! Request flow: front door → target resolution (lookups) or upload relay
//! (files) → scanner → summarizer → JSON response. The two outbound calls
//! are strictly sequential within a request; nothing is cached or persisted
//! across requests.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::clients::{OpenAiClient, VirusTotalClient};
use crate::config::Config;

pub use error::{AppError, AppResult};

/// Shared application state: immutable configuration plus the two API
/// clients, built once at startup and injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scanner: VirusTotalClient,
    pub summarizer: OpenAiClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let scanner = VirusTotalClient::new(&config.vt_api_url, &config.vt_api_key);
        let summarizer = OpenAiClient::new(
            &config.openai_api_url,
            &config.openai_api_key,
            &config.openai_model,
        );

        Self {
            config: Arc::new(config),
            scanner,
            summarizer,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/health", get(handlers::health::check))
        .route("/vt/scan", post(handlers::scan::vt_scan))
        .route("/upload", post(handlers::upload::upload_file))
        .route("/gpt", post(handlers::scan::gpt))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
