use serde::{Deserialize, Serialize};

/// Pipeline mode, chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Advanced,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Basic => "basic",
            Mode::Advanced => "advanced",
        }
    }
}

/// Query-transformation techniques. Each is independently toggleable and
/// contributes queries additively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    MultiQuery,
    RagFusion,
    Decomposition,
    StepBack,
    Hyde,
}

/// One derived search query. For HyDE the text is a hypothetical answer
/// passage embedded as a retrieval seed rather than searched literally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    /// The technique that produced this query, `None` for the original question.
    pub technique: Option<Technique>,
}

impl SearchQuery {
    pub fn original(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            technique: None,
        }
    }

    pub fn derived(text: impl Into<String>, technique: Technique) -> Self {
        Self {
            text: text.into(),
            technique: Some(technique),
        }
    }

    /// HyDE seeds are embedded, not text-searched.
    pub fn is_embedding_seed(&self) -> bool {
        self.technique == Some(Technique::Hyde)
    }
}

/// Safety classification, computed exactly once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionClass {
    /// Question requests personal contact/identification details.
    pub is_pii: bool,
    /// Question asks for a structured (STAR-style) example. Biases
    /// retrieval ranking, never rejects.
    pub is_behavioral: bool,
}
