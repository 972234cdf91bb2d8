//! ScanLens server entry point

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scanlens::{config::Config, create_router, AppState};

#[tokio::main]
async fn main() {
    // Load configuration before logging so the environment can pick the
    // log format
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "scanlens=debug,tower_http=debug".into()),
    );

    // Structured JSON logs in production, human-readable otherwise
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("ScanLens starting...");
    tracing::info!("Scanner API: {}", config.vt_api_url);
    tracing::info!("Summarizer model: {}", config.openai_model);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState::new(config);
    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
