use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::EvaluationService;
use crate::render::DocumentRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only: every evaluation is independent.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable page-1 renderer. Default: PdfiumRenderer.
    pub renderer: Arc<dyn DocumentRenderer>,
    /// Remote model. Default: GeminiClient.
    pub evaluator: Arc<dyn EvaluationService>,
    pub config: Config,
}
