use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Finalizer word band. Answers above the max are truncated at a word
/// boundary; answers below the min pass through unmodified (never padded).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    pub min_words: usize,
    pub max_words_basic: usize,
    pub max_words_advanced: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            min_words: defaults::DEFAULT_MIN_WORDS,
            max_words_basic: defaults::DEFAULT_MAX_WORDS_BASIC,
            max_words_advanced: defaults::DEFAULT_MAX_WORDS_ADVANCED,
        }
    }
}

impl AnswerConfig {
    pub fn max_words(&self, advanced: bool) -> usize {
        if advanced {
            self.max_words_advanced
        } else {
            self.max_words_basic
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = self.max_words_basic.min(self.max_words_advanced);
        if self.min_words >= max {
            return Err(ConfigError::InvalidWordBand {
                min: self.min_words,
                max,
            });
        }
        Ok(())
    }
}
