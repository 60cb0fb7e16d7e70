use persona_core::errors::PersonaResult;
use persona_core::traits::{ISanitizer, SanitizedText};

use crate::patterns;

/// Sanitizer that strips markup and replaces residual PII with
/// placeholders. Idempotent.
///
/// Runs after retrieval (before context reaches a generation provider)
/// and again over the raw answer, since providers may echo input verbatim.
pub struct SanitizerEngine;

impl SanitizerEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SanitizerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ISanitizer for SanitizerEngine {
    fn sanitize(&self, text: &str) -> PersonaResult<SanitizedText> {
        // Markup first, so PII offsets refer to the stripped text.
        let stripped = patterns::pii::strip_markup(text);

        let matches = patterns::scan_all(&stripped);
        let redactions = patterns::to_redactions(&matches);
        let sanitized = apply_replacements(&stripped, &matches);

        Ok(SanitizedText {
            text: sanitized,
            redactions,
        })
    }
}

/// Apply placeholder replacements. Matches are sorted descending by start
/// so replacements don't shift earlier offsets.
fn apply_replacements(text: &str, matches: &[patterns::RawMatch]) -> String {
    let mut sorted: Vec<&patterns::RawMatch> = matches.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = text.to_string();
    let mut last_start = result.len();
    for m in sorted {
        // Overlapping matches: the later-starting one already replaced this span.
        if m.end > last_start {
            continue;
        }
        // Guard against already-replaced text (idempotency).
        let current_slice = &result[m.start..m.end.min(result.len())];
        if current_slice.starts_with('[') && current_slice.ends_with(']') {
            continue;
        }
        if m.end <= result.len() {
            result.replace_range(m.start..m.end, m.placeholder);
            last_start = m.start;
        }
    }
    result
}
