//! HTTP generation provider for chat-completions style endpoints.
//!
//! Maps transport outcomes onto the cascade's failure taxonomy:
//! 429 → RateLimited (honoring `Retry-After`), content-filter finishes →
//! Blocked, request timeouts → Timeout, everything else → Failed.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use persona_core::errors::GenerationFailure;
use persona_core::traits::IGenerationProvider;

/// Configuration for one HTTP provider endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpProviderConfig {
    /// Registry name, referenced by cascade entries.
    pub name: String,
    /// Base URL, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Bearer token, if the endpoint requires one.
    pub api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// reqwest-backed provider.
pub struct HttpProvider {
    client: reqwest::Client,
    config: HttpProviderConfig,
}

impl HttpProvider {
    pub fn new(config: HttpProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl IGenerationProvider for HttpProvider {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<String, GenerationFailure> {
        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .timeout(timeout)
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationFailure::Timeout {
                    elapsed_ms: timeout.as_millis() as u64,
                }
            } else {
                GenerationFailure::Failed {
                    reason: e.to_string(),
                }
            }
        })?;

        if response.status().as_u16() == 429 {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(|secs| secs * 1_000);
            return Err(GenerationFailure::RateLimited { retry_after_ms });
        }
        if !response.status().is_success() {
            return Err(GenerationFailure::Failed {
                reason: format!("status {}", response.status()),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| GenerationFailure::Failed {
            reason: format!("malformed response: {e}"),
        })?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationFailure::Failed {
                reason: "response had no choices".to_string(),
            })?;

        if choice.finish_reason.as_deref() == Some("content_filter") {
            return Err(GenerationFailure::Blocked);
        }

        choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerationFailure::Blocked)
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}
