mod embedding;
mod generation;
mod sanitizer;
mod search;
mod telemetry;

pub use embedding::IEmbeddingProvider;
pub use generation::IGenerationProvider;
pub use sanitizer::{ISanitizer, Redaction, SanitizedText};
pub use search::IVectorSearch;
pub use telemetry::ITelemetrySink;
