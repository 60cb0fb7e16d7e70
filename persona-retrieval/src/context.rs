//! Context assembly: bounded selection of fused candidates, formatted
//! and sanitized before any generation provider sees it.

use tracing::debug;

use persona_core::config::RetrievalConfig;
use persona_core::errors::PersonaResult;
use persona_core::models::{FusedCandidate, RankedContext};
use persona_core::traits::ISanitizer;

/// Separator between formatted passages.
const PASSAGE_SEPARATOR: &str = "\n\n";

/// Builds the size-bounded context string handed to the Generation Cascade.
pub struct ContextBuilder<'a> {
    sanitizer: &'a dyn ISanitizer,
    config: &'a RetrievalConfig,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(sanitizer: &'a dyn ISanitizer, config: &'a RetrievalConfig) -> Self {
        Self { sanitizer, config }
    }

    /// Select the top candidates and assemble the context string.
    ///
    /// Count cap first, then the character budget: lowest-ranked entries
    /// are dropped until the formatted string fits.
    pub fn build(
        &self,
        mut fused: Vec<FusedCandidate>,
        max_docs: usize,
    ) -> PersonaResult<(RankedContext, String)> {
        fused.truncate(max_docs);

        while formatted_len(&fused) > self.config.max_context_chars && !fused.is_empty() {
            fused.pop();
        }

        let text = fused
            .iter()
            .map(|f| format_passage(f))
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR);

        let sanitized = self.sanitizer.sanitize(&text)?;

        debug!(
            docs = fused.len(),
            chars = sanitized.text.len(),
            redactions = sanitized.redactions.len(),
            "context assembled"
        );

        Ok((RankedContext { entries: fused }, sanitized.text))
    }
}

fn format_passage(f: &FusedCandidate) -> String {
    format!("[{}] {}", f.candidate.title, f.candidate.content)
}

fn formatted_len(entries: &[FusedCandidate]) -> usize {
    if entries.is_empty() {
        return 0;
    }
    let passages: usize = entries.iter().map(|f| format_passage(f).len()).sum();
    passages + PASSAGE_SEPARATOR.len() * (entries.len() - 1)
}
