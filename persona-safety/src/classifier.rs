use persona_core::models::QuestionClass;

use crate::patterns::requests;

/// Classify a question. Pure and deterministic, no external calls.
///
/// `is_pii` short-circuits the pipeline to a fixed refusal; `is_behavioral`
/// only biases retrieval ranking.
pub fn classify(question: &str) -> QuestionClass {
    let normalized = question.trim();

    let is_pii = requests::pii_request_patterns()
        .iter()
        .filter_map(|p| p.as_ref())
        .any(|re| re.is_match(normalized));

    let is_behavioral = requests::behavioral_patterns()
        .iter()
        .filter_map(|p| p.as_ref())
        .any(|re| re.is_match(normalized));

    QuestionClass {
        is_pii,
        is_behavioral,
    }
}
