use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// One cascade entry: a (provider, model) pair with its retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Registry name of the provider serving this entry.
    pub provider: String,
    pub model: String,
    /// Rate-limit retries before advancing to the next entry.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff delay (ms), doubled per retry.
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
}

fn default_max_retries() -> u32 {
    defaults::DEFAULT_MAX_RETRIES
}

fn default_base_backoff_ms() -> u64 {
    defaults::DEFAULT_BASE_BACKOFF_MS
}

impl ProviderSpec {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            max_retries: default_max_retries(),
            base_backoff_ms: default_base_backoff_ms(),
        }
    }

    /// "provider/model" label used in attempts and telemetry.
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}

/// Statically configured, ordered cascade. Validated at startup against
/// the set of registered provider names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Non-cascaded primary entry, tried first in basic mode only.
    pub primary: Option<ProviderSpec>,
    /// Fallback entries, tried in order.
    pub entries: Vec<ProviderSpec>,
    /// Per-attempt timeout (ms).
    pub attempt_timeout_ms: u64,
    /// Request-level deadline (ms) bounding the whole cascade.
    pub overall_deadline_ms: u64,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            primary: None,
            entries: Vec::new(),
            attempt_timeout_ms: defaults::DEFAULT_ATTEMPT_TIMEOUT_MS,
            overall_deadline_ms: defaults::DEFAULT_OVERALL_DEADLINE_MS,
        }
    }
}

impl CascadeConfig {
    /// The entries attempted for a request, in order.
    pub fn effective_entries(&self, basic_mode: bool) -> Vec<ProviderSpec> {
        let mut out = Vec::with_capacity(self.entries.len() + 1);
        if basic_mode {
            if let Some(primary) = &self.primary {
                out.push(primary.clone());
            }
        }
        out.extend(self.entries.iter().cloned());
        out
    }

    /// Validate against the registered provider names.
    pub fn validate(&self, registered: &[&str]) -> Result<(), ConfigError> {
        if self.entries.is_empty() && self.primary.is_none() {
            return Err(ConfigError::EmptyCascade);
        }
        for spec in self.primary.iter().chain(self.entries.iter()) {
            if !registered.contains(&spec.provider.as_str()) {
                return Err(ConfigError::UnknownProvider {
                    name: spec.provider.clone(),
                });
            }
        }
        Ok(())
    }
}
