//! Deterministic stand-ins for the renderer and the remote model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::llm_client::{EvaluationService, ServiceError};
use crate::render::{ensure_pdf_header, DocumentRenderer, ImagePayload, RenderError};
use crate::state::AppState;

/// Just enough of a PDF to pass the header check.
pub const ONE_PAGE_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n";

pub fn fixture_image() -> ImagePayload {
    ImagePayload {
        mime_type: "image/jpeg".to_string(),
        data: "/9j/4AAQSkZJRgABAQ==".to_string(),
    }
}

/// Validates the header like the real renderer, then returns `fixture_image()`.
#[derive(Default)]
pub struct StubRenderer {
    calls: AtomicUsize,
}

impl StubRenderer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentRenderer for StubRenderer {
    fn render_first_page(&self, pdf: &[u8]) -> Result<ImagePayload, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ensure_pdf_header(pdf)?;
        Ok(fixture_image())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitCall {
    pub instruction: String,
    pub image: ImagePayload,
    pub text: String,
}

enum Reply {
    Text(String),
    ApiError { status: u16, message: String },
}

/// Records every submission and answers with a canned reply.
pub struct StubService {
    reply: Reply,
    calls: Mutex<Vec<SubmitCall>>,
}

impl StubService {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Reply::Text(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Reply::ApiError {
                status,
                message: message.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SubmitCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvaluationService for StubService {
    async fn submit(
        &self,
        instruction: &str,
        image: &ImagePayload,
        text: &str,
    ) -> Result<String, ServiceError> {
        self.calls.lock().unwrap().push(SubmitCall {
            instruction: instruction.to_string(),
            image: image.clone(),
            text: text.to_string(),
        });

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::ApiError { status, message } => Err(ServiceError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

pub fn test_state(renderer: Arc<StubRenderer>, evaluator: Arc<StubService>) -> AppState {
    AppState {
        renderer,
        evaluator,
        config: Config::default(),
    }
}
