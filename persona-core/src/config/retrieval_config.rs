use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval and fusion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Candidates requested per query.
    pub top_k: usize,
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Context cap (count) in basic mode.
    pub max_context_docs_basic: usize,
    /// Context cap (count) in advanced mode.
    pub max_context_docs_advanced: usize,
    /// Character budget for the assembled context, enforced after the
    /// count cap by dropping lowest-ranked entries.
    pub max_context_chars: usize,
    /// Per-query timeout (ms). Timed-out queries contribute empty lists.
    pub query_timeout_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            rrf_k: defaults::DEFAULT_RRF_K,
            max_context_docs_basic: defaults::DEFAULT_MAX_CONTEXT_DOCS_BASIC,
            max_context_docs_advanced: defaults::DEFAULT_MAX_CONTEXT_DOCS_ADVANCED,
            max_context_chars: defaults::DEFAULT_MAX_CONTEXT_CHARS,
            query_timeout_ms: defaults::DEFAULT_QUERY_TIMEOUT_MS,
        }
    }
}

impl RetrievalConfig {
    /// Context cap for the given mode.
    pub fn max_context_docs(&self, advanced: bool) -> usize {
        if advanced {
            self.max_context_docs_advanced
        } else {
            self.max_context_docs_basic
        }
    }
}
