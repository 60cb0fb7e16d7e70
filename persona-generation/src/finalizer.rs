//! Response finalization: word-band enforcement plus the final
//! sanitization guard, since providers may echo input verbatim.

use persona_core::errors::PersonaResult;
use persona_core::traits::ISanitizer;

pub struct ResponseFinalizer<'a> {
    sanitizer: &'a dyn ISanitizer,
}

impl<'a> ResponseFinalizer<'a> {
    pub fn new(sanitizer: &'a dyn ISanitizer) -> Self {
        Self { sanitizer }
    }

    /// Sanitize the raw answer, then truncate to at most `max_words` at a
    /// word boundary. Answers shorter than `min_words` pass through
    /// unmodified — never padded with invented content.
    pub fn finalize(
        &self,
        raw_answer: &str,
        min_words: usize,
        max_words: usize,
    ) -> PersonaResult<String> {
        let sanitized = self.sanitizer.sanitize(raw_answer)?.text;

        let words: Vec<&str> = sanitized.split_whitespace().collect();
        if words.len() < min_words || words.len() <= max_words {
            return Ok(sanitized);
        }
        Ok(words[..max_words].join(" "))
    }
}
