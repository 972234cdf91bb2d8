//! Shared test helpers: a mock upstream service standing in for both the
//! VirusTotal API and the chat-completions summarizer, plus a factory for a
//! fully wired test server pointing at it.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_test::TestServer;
use serde_json::{json, Value};

use scanlens::config::Config;
use scanlens::{create_router, AppState};

/// Observable state of the mock upstream.
pub struct UpstreamState {
    pub lookup_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub completion_calls: AtomicUsize,

    pub fail_lookups: AtomicBool,
    pub fail_uploads: AtomicBool,
    pub fail_completions: AtomicBool,

    pub last_lookup_path: Mutex<Option<String>>,
    pub last_api_key: Mutex<Option<String>>,
    pub last_upload: Mutex<Option<(String, Vec<u8>)>>,
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
    pub last_prompt: Mutex<Option<String>>,

    pub scan_response: Mutex<Value>,
    pub summary_text: Mutex<String>,
}

impl UpstreamState {
    fn new() -> Self {
        Self {
            lookup_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            completion_calls: AtomicUsize::new(0),
            fail_lookups: AtomicBool::new(false),
            fail_uploads: AtomicBool::new(false),
            fail_completions: AtomicBool::new(false),
            last_lookup_path: Mutex::new(None),
            last_api_key: Mutex::new(None),
            last_upload: Mutex::new(None),
            uploads: Mutex::new(Vec::new()),
            last_prompt: Mutex::new(None),
            scan_response: Mutex::new(json!({ "data": {} })),
            summary_text: Mutex::new("mock summary".to_string()),
        }
    }

    pub fn set_scan_response(&self, value: Value) {
        *self.scan_response.lock().unwrap() = value;
    }

    pub fn set_summary_text(&self, text: &str) {
        *self.summary_text.lock().unwrap() = text.to_string();
    }

    pub fn last_lookup_path(&self) -> Option<String> {
        self.last_lookup_path.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    pub fn last_upload(&self) -> Option<(String, Vec<u8>)> {
        self.last_upload.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }
}

pub struct MockUpstream {
    pub state: Arc<UpstreamState>,
    pub base_url: String,
}

/// Bind the mock upstream to an ephemeral local port.
pub async fn spawn_upstream() -> MockUpstream {
    let state = Arc::new(UpstreamState::new());

    let router = Router::new()
        .route("/files", post(file_scan))
        .route("/chat/completions", post(completions))
        .route("/*path", get(lookup))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockUpstream {
        state,
        base_url: format!("http://{}", addr),
    }
}

/// Build a test server whose scanner and summarizer both point at the mock
/// upstream, staging uploads under the given directory.
pub fn test_server(upstream: &MockUpstream, upload_dir: &std::path::Path) -> TestServer {
    let config = Config {
        port: 0,
        vt_api_url: upstream.base_url.clone(),
        vt_api_key: "test-vt-key".to_string(),
        openai_api_url: upstream.base_url.clone(),
        openai_api_key: "test-openai-key".to_string(),
        openai_model: "gpt-4".to_string(),
        upload_dir: upload_dir.to_path_buf(),
        environment: "development".to_string(),
    };

    TestServer::new(create_router(AppState::new(config))).expect("Failed to start test server")
}

async fn lookup(
    State(state): State<Arc<UpstreamState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.lookup_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_lookup_path.lock().unwrap() = Some(path);
    *state.last_api_key.lock().unwrap() = headers
        .get("x-apikey")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    if state.fail_lookups.load(Ordering::SeqCst) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "code": "NotFoundError" } })),
        )
            .into_response();
    }

    Json(state.scan_response.lock().unwrap().clone()).into_response()
}

async fn file_scan(
    State(state): State<Arc<UpstreamState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    state.upload_calls.fetch_add(1, Ordering::SeqCst);

    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap().to_vec();
            *state.last_upload.lock().unwrap() = Some((filename.clone(), bytes.clone()));
            state.uploads.lock().unwrap().push((filename, bytes));
        }
    }

    if state.fail_uploads.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": "InvalidArgumentError" } })),
        )
            .into_response();
    }

    Json(state.scan_response.lock().unwrap().clone()).into_response()
}

async fn completions(
    State(state): State<Arc<UpstreamState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.completion_calls.fetch_add(1, Ordering::SeqCst);
    let prompt = body["messages"][0]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    *state.last_prompt.lock().unwrap() = Some(prompt);

    if state.fail_completions.load(Ordering::SeqCst) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": { "message": "quota exceeded" } })),
        )
            .into_response();
    }

    let content = state.summary_text.lock().unwrap().clone();
    Json(json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    }))
    .into_response()
}
