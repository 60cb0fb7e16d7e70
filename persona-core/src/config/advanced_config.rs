use serde::{Deserialize, Serialize};

use super::defaults;

/// Technique toggles for advanced mode. Each is independent; enabled
/// techniques contribute queries additively. With everything off,
/// advanced mode behaves as basic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfig {
    /// Ask the generation provider for paraphrases of the question.
    pub multi_query: bool,
    /// Paraphrase count for multi-query.
    pub multi_query_count: usize,
    /// Tag generated queries for RRF fusion diagnostics.
    pub rag_fusion: bool,
    /// Split a compound question into sub-questions.
    pub decomposition: bool,
    /// Generalize a specific question into a broader retrievable one.
    pub step_back: bool,
    /// Generate a hypothetical answer passage and retrieve by its embedding.
    pub hyde: bool,
    /// Timeout (ms) for each technique's transformation prompt.
    pub transform_timeout_ms: u64,
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            multi_query: true,
            multi_query_count: defaults::DEFAULT_MULTI_QUERY_COUNT,
            rag_fusion: true,
            decomposition: false,
            step_back: false,
            hyde: false,
            transform_timeout_ms: defaults::DEFAULT_TRANSFORM_TIMEOUT_MS,
        }
    }
}

impl AdvancedConfig {
    /// Whether any transformation technique is enabled.
    pub fn any_enabled(&self) -> bool {
        self.multi_query || self.decomposition || self.step_back || self.hyde
    }
}

/// Caller-supplied per-request overrides. Unset fields keep configured
/// values; this replaces dynamic partial-object merging with named fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedOverrides {
    pub multi_query: Option<bool>,
    pub multi_query_count: Option<usize>,
    pub rag_fusion: Option<bool>,
    pub decomposition: Option<bool>,
    pub step_back: Option<bool>,
    pub hyde: Option<bool>,
}

impl AdvancedOverrides {
    /// Apply overrides on top of the configured defaults.
    pub fn apply(&self, base: &AdvancedConfig) -> AdvancedConfig {
        AdvancedConfig {
            multi_query: self.multi_query.unwrap_or(base.multi_query),
            multi_query_count: self.multi_query_count.unwrap_or(base.multi_query_count),
            rag_fusion: self.rag_fusion.unwrap_or(base.rag_fusion),
            decomposition: self.decomposition.unwrap_or(base.decomposition),
            step_back: self.step_back.unwrap_or(base.step_back),
            hyde: self.hyde.unwrap_or(base.hyde),
            transform_timeout_ms: base.transform_timeout_ms,
        }
    }
}
