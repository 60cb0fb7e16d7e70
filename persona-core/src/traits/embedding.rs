use crate::errors::PersonaResult;

/// Embedding generation collaborator. The model invocation itself is
/// external; the pipeline only needs `text -> vector`.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> PersonaResult<Vec<f32>>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
