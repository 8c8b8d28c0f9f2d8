pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(ui::index))
        .route("/health", get(health::health_handler))
        .route("/api/v1/evaluations", post(handlers::handle_evaluate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
