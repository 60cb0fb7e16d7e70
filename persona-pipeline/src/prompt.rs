//! Grounded answer prompt handed to the generation cascade.

/// Build the answer prompt from the assembled context and the question.
///
/// The context is the only knowledge the model may draw on; the
/// instructions forbid inventing facts or volunteering contact details,
/// mirroring what the sanitizer enforces downstream.
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        "You are answering questions about a professional profile, speaking in first person.\n\
         Use ONLY the background passages below. If they do not contain the answer, say so \
         briefly instead of inventing details. Never share contact information, addresses, \
         or identification numbers.\n\n\
         Background:\n{context}\n\n\
         Question: {question}\n\n\
         Answer:"
    )
}
