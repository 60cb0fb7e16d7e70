//! # persona-retrieval
//!
//! Stage 1 of the pipeline: question → search queries → candidates →
//! fused, bounded context.
//!
//! Query transformation is best-effort (a failed technique drops its
//! contribution), retrieval fans out concurrently with per-query
//! timeouts, and fusion merges the per-query lists with RRF under a
//! deterministic total order.

pub mod context;
pub mod expansion;
pub mod search;

pub use context::ContextBuilder;
pub use expansion::{QueryTransformer, TransformOutcome};
pub use search::{QueryResults, Retriever};
