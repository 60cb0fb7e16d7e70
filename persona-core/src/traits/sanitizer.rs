use serde::{Deserialize, Serialize};

use crate::errors::PersonaResult;

/// Result of sanitization with metadata about what was redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedText {
    pub text: String,
    pub redactions: Vec<Redaction>,
}

/// A single redaction applied during sanitization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redaction {
    pub category: String,
    pub placeholder: String,
    pub start: usize,
    pub end: usize,
}

/// PII and markup stripping, applied to retrieved context before it is
/// handed to a generation provider and to the raw answer afterwards.
pub trait ISanitizer: Send + Sync {
    /// Sanitize text, replacing PII with placeholders and stripping
    /// markup-control characters.
    fn sanitize(&self, text: &str) -> PersonaResult<SanitizedText>;
}
