mod config;
mod errors;
mod evaluation;
mod llm_client;
mod render;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::render::PdfiumRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS Resume Expert v{}", env!("CARGO_PKG_VERSION"));

    if config.google_api_key.is_none() {
        warn!("GOOGLE_API_KEY is not set; every evaluation will fail until it is configured");
    }

    let evaluator = GeminiClient::new(&config)?;
    info!("Gemini client initialized (model: {})", evaluator.model());

    let renderer = PdfiumRenderer::new(&config);
    match &config.pdfium_library_path {
        Some(dir) => info!("PDF renderer initialized (pdfium from {dir})"),
        None => info!("PDF renderer initialized (system pdfium)"),
    }

    let state = AppState {
        renderer: Arc::new(renderer),
        evaluator: Arc::new(evaluator),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
