//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the generative-language API directly.
//! Everything goes through `EvaluationService`, implemented here by `GeminiClient`.
//!
//! One request per evaluation. No retries.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::render::ImagePayload;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("GOOGLE_API_KEY is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Prompt was blocked by the model: {0}")]
    Blocked(String),

    #[error("Model returned empty content")]
    EmptyContent,
}

/// The remote model capability: one instruction, one image, one text in; text out.
///
/// Carried in `AppState` as `Arc<dyn EvaluationService>`.
#[async_trait]
pub trait EvaluationService: Send + Sync {
    async fn submit(
        &self,
        instruction: &str,
        image: &ImagePayload,
        text: &str,
    ) -> Result<String, ServiceError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    pub fn text(&self) -> Result<String, ServiceError> {
        let Some(candidate) = self.candidates.first() else {
            return match self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
            {
                Some(reason) => Err(ServiceError::Blocked(reason)),
                None => Err(ServiceError::EmptyContent),
            };
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            return Err(match &candidate.finish_reason {
                Some(reason) if reason != "STOP" => ServiceError::Blocked(reason.clone()),
                _ => ServiceError::EmptyContent,
            });
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Pulls the human-readable message out of Google's error envelope, or returns the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<GoogleError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Wraps the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.gemini_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
            api_key: config.google_api_key.clone(),
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.gemini_api_base, config.gemini_model
            ),
            model: config.gemini_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn build_request<'a>(
    instruction: &'a str,
    image: &'a ImagePayload,
    text: &'a str,
) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![
                Part::Text { text: instruction },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: &image.mime_type,
                        data: &image.data,
                    },
                },
                Part::Text { text },
            ],
        }],
    }
}

#[async_trait]
impl EvaluationService for GeminiClient {
    async fn submit(
        &self,
        instruction: &str,
        image: &ImagePayload,
        text: &str,
    ) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::MissingCredential)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&build_request(instruction, image, text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed.text()
    }
}
