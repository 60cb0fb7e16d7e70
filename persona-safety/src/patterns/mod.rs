//! Regex pattern tables: question classification and text sanitization.

pub mod pii;
pub mod requests;

use persona_core::traits::Redaction;

/// A raw sanitizer match before replacement.
#[derive(Debug, Clone)]
pub struct RawMatch {
    pub category: &'static str,
    pub placeholder: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Scan `text` with every sanitization pattern. Patterns that failed to
/// compile at init time (LazyLock = None) simply produce no matches.
pub fn scan_all(text: &str) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    for pat in pii::all_patterns() {
        let Some(re) = pat.regex.as_ref() else {
            continue;
        };
        for m in re.find_iter(text) {
            matches.push(RawMatch {
                category: pat.name,
                placeholder: pat.placeholder,
                start: m.start(),
                end: m.end(),
            });
        }
    }
    matches
}

/// Convert kept matches into redaction metadata.
pub fn to_redactions(matches: &[RawMatch]) -> Vec<Redaction> {
    matches
        .iter()
        .map(|m| Redaction {
            category: m.category.to_string(),
            placeholder: m.placeholder.to_string(),
            start: m.start,
            end: m.end,
        })
        .collect()
}
