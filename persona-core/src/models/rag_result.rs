use serde::{Deserialize, Serialize};

use super::{Candidate, Mode, Technique};
use crate::constants::{EMPTY_QUESTION_PROMPT, NO_INFORMATION_ANSWER, REFUSAL_ANSWER};

/// Per-request diagnostics attached to every result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagMetadata {
    pub mode: Mode,
    pub techniques_used: Vec<Technique>,
    pub processing_time_ms: u64,
    /// Derived query texts, in generation order (diagnostic only).
    pub transformed_queries: Vec<String>,
}

impl RagMetadata {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            techniques_used: Vec::new(),
            processing_time_ms: 0,
            transformed_queries: Vec::new(),
        }
    }
}

/// The single shared contract returned to every caller (tool boundary,
/// chat boundary, direct API).
///
/// Invariant: `error` is set if and only if `answer` is empty and no
/// refusal path was taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResult {
    pub answer: String,
    pub sources: Vec<Candidate>,
    pub metadata: RagMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RagResult {
    /// Successful answer with its supporting sources.
    pub fn answered(answer: String, sources: Vec<Candidate>, metadata: RagMetadata) -> Self {
        Self {
            answer,
            sources,
            metadata,
            error: None,
        }
    }

    /// Empty/invalid question. Recovered locally with a retry prompt.
    pub fn input_rejected(mode: Mode) -> Self {
        Self {
            answer: String::new(),
            sources: Vec::new(),
            metadata: RagMetadata::new(mode),
            error: Some(EMPTY_QUESTION_PROMPT.to_string()),
        }
    }

    /// Fixed refusal for PII-seeking questions. Never an error.
    pub fn policy_refusal(metadata: RagMetadata) -> Self {
        Self {
            answer: REFUSAL_ANSWER.to_string(),
            sources: Vec::new(),
            metadata,
            error: None,
        }
    }

    /// All retrieval queries failed or came back empty. Surfaced as a
    /// low-confidence answer, not an error.
    pub fn no_information(metadata: RagMetadata) -> Self {
        Self {
            answer: NO_INFORMATION_ANSWER.to_string(),
            sources: Vec::new(),
            metadata,
            error: None,
        }
    }

    /// Terminal pipeline failure (generation exhausted or unexpected).
    pub fn failed(error: String, metadata: RagMetadata) -> Self {
        Self {
            answer: String::new(),
            sources: Vec::new(),
            metadata,
            error: Some(error),
        }
    }
}
