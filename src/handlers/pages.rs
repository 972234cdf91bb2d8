//! Landing page handler
//!
//! The page itself is embedded in the binary; its scripts are served from
//! the `static` directory by `tower_http::services::ServeDir`.

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
