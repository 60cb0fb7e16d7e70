use async_trait::async_trait;

use crate::errors::PersonaResult;
use crate::models::Candidate;

/// Vector-store collaborator. Storage and indexing internals are external;
/// the pipeline only needs ranked top-k lookups.
#[async_trait]
pub trait IVectorSearch: Send + Sync {
    /// Top-k candidates for a text query.
    async fn search_text(&self, query: &str, k: usize) -> PersonaResult<Vec<Candidate>>;

    /// Top-k candidates for a pre-computed embedding (HyDE seeds).
    async fn search_embedding(&self, embedding: &[f32], k: usize) -> PersonaResult<Vec<Candidate>>;
}
