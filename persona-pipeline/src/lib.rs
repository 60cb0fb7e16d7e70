//! # persona-pipeline
//!
//! The orchestrator. `RagEngine::query` runs the full chain — safety
//! gate, query transformation, concurrent retrieval, RRF fusion,
//! context assembly, generation cascade, finalization — and always
//! returns a `RagResult`: refusals and degraded answers are results,
//! not errors.

pub mod engine;
pub mod prompt;

pub use engine::{RagEngine, RagEngineBuilder};
