use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / - Serve the evaluation page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}
