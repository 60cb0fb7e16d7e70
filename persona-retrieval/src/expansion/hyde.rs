//! Hypothetical Document Embedding (HyDE).
//!
//! Asks the generation provider for a short hypothetical answer passage.
//! The passage is embedded and used as an additional retrieval seed in
//! place of the raw question text, improving similarity with passages
//! that look like answers rather than questions.

pub fn hyde_prompt(question: &str) -> String {
    format!(
        "Write a short passage (2-3 sentences) that could plausibly appear in a \
         professional profile knowledge base and would directly answer the question \
         below. Do not mention that it is hypothetical. Passage only.\n\n\
         Question: {question}"
    )
}
