/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("query timed out after {timeout_ms}ms: {query}")]
    QueryTimeout { query: String, timeout_ms: u64 },

    #[error("all {queries} retrieval queries failed or returned nothing")]
    AllQueriesFailed { queries: usize },

    #[error("embedding failed: {reason}")]
    EmbeddingFailed { reason: String },
}
