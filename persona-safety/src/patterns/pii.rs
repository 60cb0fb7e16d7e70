//! Sanitization patterns for residual contact-identifying substrings.
//!
//! These run over retrieved context and generated answers, not over the
//! question itself (that is the classifier's job).

use regex::Regex;
use std::sync::LazyLock;

/// A compiled sanitization pattern.
pub struct PiiPattern {
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub placeholder: &'static str,
}

macro_rules! pii_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Email ──────────────────────────────────────────────────────────────────
pii_pattern!(
    RE_EMAIL,
    r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
);

// ── Phone numbers (international + US formats) ────────────────────────────
pii_pattern!(
    RE_PHONE,
    r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]\d{3}[-.\s]?\d{4}\b"
);

// ── SSN ────────────────────────────────────────────────────────────────────
pii_pattern!(RE_SSN, r"\b\d{3}-\d{2}-\d{4}\b");

// ── Physical address (US-style street address) ────────────────────────────
pii_pattern!(
    RE_ADDRESS,
    r"\b\d{1,5}\s+(?:[A-Z][a-z]+\s?){1,4}(?:St|Street|Ave|Avenue|Blvd|Boulevard|Dr|Drive|Ln|Lane|Rd|Road|Ct|Court|Pl|Place|Way)\b"
);

/// All sanitization patterns in detection order (most specific first).
pub fn all_patterns() -> Vec<PiiPattern> {
    vec![
        PiiPattern {
            name: "email",
            regex: &RE_EMAIL,
            placeholder: "[EMAIL]",
        },
        PiiPattern {
            name: "ssn",
            regex: &RE_SSN,
            placeholder: "[SSN]",
        },
        PiiPattern {
            name: "phone",
            regex: &RE_PHONE,
            placeholder: "[PHONE]",
        },
        PiiPattern {
            name: "address",
            regex: &RE_ADDRESS,
            placeholder: "[ADDRESS]",
        },
    ]
}

// ── Markup stripping ───────────────────────────────────────────────────────
pii_pattern!(RE_MARKUP_TAG, r"</?[a-zA-Z][^>\n]{0,120}>");

/// Strip markup tags and control characters before the text reaches a
/// generation provider.
pub fn strip_markup(text: &str) -> String {
    let without_tags = match RE_MARKUP_TAG.as_ref() {
        Some(re) => re.replace_all(text, " ").into_owned(),
        None => text.to_string(),
    };
    without_tags
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
