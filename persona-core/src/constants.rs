/// Persona system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed answer returned for PII-seeking questions. Never varies.
pub const REFUSAL_ANSWER: &str = "I can't share personal contact or identification details. \
     Feel free to ask about professional experience, skills, or projects instead.";

/// Low-confidence answer returned when every retrieval query failed or came back empty.
pub const NO_INFORMATION_ANSWER: &str =
    "I don't have information about that in the knowledge base. \
     Try asking about work history, skills, or specific projects.";

/// Retry prompt returned for an empty question.
pub const EMPTY_QUESTION_PROMPT: &str = "Please enter a question";

/// Tags that mark a candidate as a behavioral (STAR-style) example.
pub const BEHAVIORAL_TAGS: [&str; 2] = ["star", "behavioral"];
