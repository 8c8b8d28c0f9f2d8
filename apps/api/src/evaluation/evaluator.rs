//! Evaluation pipeline: precondition check → render page 1 → one model call.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::models::{EvaluationForm, EvaluationRequest, EvaluationResponse};
use crate::llm_client::EvaluationService;
use crate::render::{DocumentRenderer, ImagePayload};

pub const MISSING_RESUME_WARNING: &str = "Please upload a resume first";

/// Runs one evaluation to completion.
///
/// Without a resume nothing is rendered and nothing is sent; the caller gets
/// `AppError::MissingInput`. Render and service failures end the interaction
/// with no partial text.
pub async fn run_evaluation(
    renderer: Arc<dyn DocumentRenderer>,
    service: &dyn EvaluationService,
    form: EvaluationForm,
) -> Result<EvaluationResponse, AppError> {
    let EvaluationForm {
        job_description,
        resume,
        prompt_kind,
    } = form;

    let Some(pdf) = resume.filter(|bytes| !bytes.is_empty()) else {
        warn!(
            prompt_kind = prompt_kind.as_str(),
            "Evaluation requested without a resume"
        );
        return Err(AppError::MissingInput(MISSING_RESUME_WARNING.to_string()));
    };

    let evaluation_id = Uuid::new_v4();
    let span = info_span!(
        "evaluation",
        %evaluation_id,
        prompt_kind = prompt_kind.as_str()
    );

    async move {
        info!("Rendering resume ({} bytes)", pdf.len());
        let resume_image = render_first_page(renderer, pdf).await?;

        let request = EvaluationRequest {
            job_description,
            resume_image,
            prompt_kind,
        };

        let text = service
            .submit(
                request.prompt_kind.instruction(),
                &request.resume_image,
                &request.job_description,
            )
            .await?;

        info!("Evaluation completed ({} chars)", text.len());

        Ok(EvaluationResponse {
            evaluation_id,
            prompt_kind,
            heading: prompt_kind.heading().to_string(),
            text,
            evaluated_at: Utc::now(),
        })
    }
    .instrument(span)
    .await
}

/// Rendering is CPU-bound, so it runs on the blocking pool.
async fn render_first_page(
    renderer: Arc<dyn DocumentRenderer>,
    pdf: Bytes,
) -> Result<ImagePayload, AppError> {
    let payload = tokio::task::spawn_blocking(move || renderer.render_first_page(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Render task failed: {e}")))??;
    Ok(payload)
}
