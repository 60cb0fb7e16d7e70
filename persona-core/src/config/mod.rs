mod advanced_config;
mod answer_config;
mod cascade_config;
pub mod defaults;
mod retrieval_config;

pub use advanced_config::{AdvancedConfig, AdvancedOverrides};
pub use answer_config::AnswerConfig;
pub use cascade_config::{CascadeConfig, ProviderSpec};
pub use retrieval_config::RetrievalConfig;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub retrieval: RetrievalConfig,
    pub advanced: AdvancedConfig,
    pub cascade: CascadeConfig,
    pub answer: AnswerConfig,
}

impl RagConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Validate at startup. `registered` lists the provider names known
    /// to the cascade's registry.
    pub fn validate(&self, registered: &[&str]) -> Result<(), ConfigError> {
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        self.answer.validate()?;
        self.cascade.validate(registered)
    }
}
