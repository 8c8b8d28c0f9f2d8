use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluation::prompts::{DETAILED_REVIEW_INSTRUCTION, MATCH_PERCENTAGE_INSTRUCTION};
use crate::render::ImagePayload;

/// Which of the two evaluations the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    DetailedReview,
    MatchPercentage,
}

impl PromptKind {
    pub fn instruction(self) -> &'static str {
        match self {
            PromptKind::DetailedReview => DETAILED_REVIEW_INSTRUCTION,
            PromptKind::MatchPercentage => MATCH_PERCENTAGE_INSTRUCTION,
        }
    }

    /// Heading shown above the model's answer.
    pub fn heading(self) -> &'static str {
        match self {
            PromptKind::DetailedReview => "Detailed Resume Analysis",
            PromptKind::MatchPercentage => "Resume Matching Results",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptKind::DetailedReview => "detailed_review",
            PromptKind::MatchPercentage => "match_percentage",
        }
    }
}

impl FromStr for PromptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "detailed_review" => Ok(PromptKind::DetailedReview),
            "match_percentage" => Ok(PromptKind::MatchPercentage),
            other => Err(format!(
                "prompt_kind must be 'detailed_review' or 'match_percentage', got '{other}'"
            )),
        }
    }
}

/// What the page submitted. `resume` is `None` when no file was chosen.
#[derive(Debug, Clone)]
pub struct EvaluationForm {
    pub job_description: String,
    pub resume: Option<Bytes>,
    pub prompt_kind: PromptKind,
}

/// Everything sent to the model for one interaction. Only exists once a resume was rendered.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub job_description: String,
    pub resume_image: ImagePayload,
    pub prompt_kind: PromptKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub evaluation_id: Uuid,
    pub prompt_kind: PromptKind,
    pub heading: String,
    /// The model's answer, untouched.
    pub text: String,
    pub evaluated_at: DateTime<Utc>,
}
