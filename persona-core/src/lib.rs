//! # persona-core
//!
//! Foundation crate for the Persona question-answering pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RagConfig;
pub use errors::{PersonaError, PersonaResult};
pub use models::{Candidate, Mode, QuestionClass, RagResult, Technique};
