//! # persona-generation
//!
//! Stage 2 of the pipeline: question + context → answer.
//!
//! The cascade walks an ordered list of (provider, model) entries.
//! Rate limits are retried in place with exponential backoff and jitter;
//! moderation blocks and errors advance immediately; a request-level
//! deadline bounds the whole run. Exhaustion is the only failure the
//! caller ever sees.

pub mod backoff;
pub mod cascade;
pub mod finalizer;
pub mod providers;

pub use cascade::{CascadeRun, GenerationCascade, ProviderRegistry};
pub use finalizer::ResponseFinalizer;
