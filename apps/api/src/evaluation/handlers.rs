//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::evaluation::evaluator::run_evaluation;
use crate::evaluation::models::{EvaluationForm, EvaluationResponse, PromptKind};
use crate::state::AppState;

/// POST /api/v1/evaluations
///
/// multipart/form-data: `job_description`, `resume` (PDF), `prompt_kind`.
/// Returns the model's answer verbatim, or a `MISSING_INPUT` warning when no file was sent.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationResponse>, AppError> {
    let form = read_form(multipart, state.config.max_upload_bytes).await?;
    let response = run_evaluation(state.renderer.clone(), state.evaluator.as_ref(), form).await?;
    Ok(Json(response))
}

async fn read_form(mut multipart: Multipart, limit: usize) -> Result<EvaluationForm, AppError> {
    let to_app_error = |e: MultipartError| multipart_error(e, limit);
    let mut job_description = String::new();
    let mut resume: Option<Bytes> = None;
    let mut prompt_kind: Option<PromptKind> = None;

    while let Some(field) = multipart.next_field().await.map_err(to_app_error)? {
        match field.name() {
            Some("job_description") => {
                job_description = field.text().await.map_err(to_app_error)?;
            }
            Some("resume") => {
                // Browsers send an empty part when no file was picked.
                let bytes = field.bytes().await.map_err(to_app_error)?;
                resume = Some(bytes).filter(|b| !b.is_empty());
            }
            Some("prompt_kind") => {
                let raw = field.text().await.map_err(to_app_error)?;
                prompt_kind = Some(raw.parse().map_err(AppError::Validation)?);
            }
            _ => {}
        }
    }

    let prompt_kind =
        prompt_kind.ok_or_else(|| AppError::Validation("prompt_kind is required".to_string()))?;

    Ok(EvaluationForm {
        job_description,
        resume,
        prompt_kind,
    })
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!(
            "The upload exceeds the {limit} byte limit. Please upload a smaller resume."
        ));
    }
    AppError::Validation(format!("Malformed form data: {}", e.body_text()))
}
