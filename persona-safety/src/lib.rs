//! # persona-safety
//!
//! Safety Filter and sanitizer for the Persona pipeline.
//!
//! Classification is pure and deterministic: PII-seeking questions are
//! short-circuited by the pipeline, behavioral questions only bias
//! retrieval ranking. The sanitizer is the defense-in-depth layer that
//! strips residual contact details and markup from context and answers.

mod classifier;
mod engine;
pub mod patterns;

pub use classifier::classify;
pub use engine::SanitizerEngine;
