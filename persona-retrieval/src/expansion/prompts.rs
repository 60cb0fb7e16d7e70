//! Prompt templates for the transformation techniques, plus response
//! parsing shared by the line-oriented ones.

/// Upper bound on decomposition sub-questions.
pub const MAX_SUB_QUESTIONS: usize = 3;

pub fn multi_query_prompt(question: &str, count: usize) -> String {
    format!(
        "You rewrite search queries. Generate {count} alternative phrasings of the \
         question below for searching a professional profile knowledge base. \
         One per line, no numbering, no commentary.\n\nQuestion: {question}"
    )
}

pub fn decomposition_prompt(question: &str) -> String {
    format!(
        "Break the question below into at most {MAX_SUB_QUESTIONS} self-contained \
         sub-questions that can each be answered independently from a professional \
         profile knowledge base. One per line, no numbering. If the question is \
         already simple, return it unchanged.\n\nQuestion: {question}"
    )
}

pub fn step_back_prompt(question: &str) -> String {
    format!(
        "Rewrite the question below as one broader, more general question about \
         the same underlying topic, suitable for retrieving background material. \
         Reply with the question only.\n\nQuestion: {question}"
    )
}

/// Parse a line-oriented model response into at most `max` query strings.
/// Strips bullets and numbering; drops blanks and exact duplicates.
pub fn parse_query_lines(response: &str, max: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for line in response.lines() {
        let cleaned = line
            .trim()
            .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | ')' | '-' | '*'))
            .trim();
        if cleaned.is_empty() {
            continue;
        }
        if out.iter().any(|q| q.eq_ignore_ascii_case(cleaned)) {
            continue;
        }
        out.push(cleaned.to_string());
        if out.len() == max {
            break;
        }
    }
    out
}
