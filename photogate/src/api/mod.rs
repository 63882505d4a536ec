//! HTTP API module - gateway routes

mod photos;
mod random;

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::unsplash::{ImageFetcher, PhotoApi};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub photos: Arc<dyn PhotoApi>,
    pub images: Arc<dyn ImageFetcher>,
}

impl AppState {
    pub fn new(photos: Arc<dyn PhotoApi>, images: Arc<dyn ImageFetcher>) -> Self {
        Self { photos, images }
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(random::router())
        .merge(photos::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>photogate</title>
</head>
<body>
<h1>photogate</h1>
<p>Random photo for a search term: <code>{url}/random/mountains?w=800&amp;h=600</code></p>
<p>The same photo every time: <code>{url}/random/mountains?seed=42</code></p>
<p>A photo by id: <code>{url}/id/{photo_id}?w=400&amp;format=webp</code></p>
<p>Photo details: <code>{url}/info/{photo_id}</code></p>
</body>
</html>
"#;

/// Landing page with this deployment's origin filled in
async fn root(headers: HeaderMap) -> impl IntoResponse {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let url = format!("https://{}", escape_html(host));

    Html(LANDING_PAGE.replace("{url}", &url))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404: File Not Found")
}
