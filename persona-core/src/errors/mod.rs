mod config_error;
mod generation_error;
mod retrieval_error;

pub use config_error::ConfigError;
pub use generation_error::{GenerationError, GenerationFailure};
pub use retrieval_error::RetrievalError;

/// Top-level error for the Persona pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PersonaError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("sanitization failed: {reason}")]
    Sanitization { reason: String },
}

pub type PersonaResult<T> = Result<T, PersonaError>;
