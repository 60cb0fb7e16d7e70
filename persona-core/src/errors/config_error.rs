/// Configuration validation errors, raised at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cascade has no entries")]
    EmptyCascade,

    #[error("cascade entry references unknown provider '{name}'")]
    UnknownProvider { name: String },

    #[error("invalid word band: min {min} must be below max {max}")]
    InvalidWordBand { min: usize, max: usize },

    #[error("retrieval top_k must be non-zero")]
    ZeroTopK,

    #[error("failed to parse config: {reason}")]
    Parse { reason: String },
}
