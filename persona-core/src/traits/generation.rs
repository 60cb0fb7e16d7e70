use std::time::Duration;

use async_trait::async_trait;

use crate::errors::GenerationFailure;

/// A language-model provider. One provider may serve several models;
/// the cascade selects the (provider, model) pair per attempt.
#[async_trait]
pub trait IGenerationProvider: Send + Sync {
    /// Generate a completion for `prompt` using `model`.
    ///
    /// Implementations should honor `timeout` in their own client config;
    /// the cascade additionally enforces it from the outside.
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<String, GenerationFailure>;

    /// Registry name referenced by cascade config entries.
    fn name(&self) -> &str;
}
