//! GenerationCascade: ordered provider fallback with per-entry retry.
//!
//! State machine per request:
//! `Attempting(entry_i)` → Success, or
//! RateLimited → Backoff → retry same entry (bounded), or
//! Blocked / Error → `Attempting(entry_{i+1})`.
//! Terminal states: Success or Exhausted. Deadline expiry forces
//! Exhausted regardless of remaining entries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use persona_core::config::{CascadeConfig, ProviderSpec};
use persona_core::errors::{ConfigError, GenerationError, GenerationFailure};
use persona_core::models::{AttemptOutcome, FallbackReason, GenerationAttempt, TelemetryEvent};
use persona_core::traits::{IGenerationProvider, ITelemetrySink};

/// Named providers the cascade can dispatch to.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn IGenerationProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn IGenerationProvider>) {
        self.providers
            .insert(provider.name().to_string(), provider);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn IGenerationProvider>> {
        self.providers.get(name)
    }

    /// Registered names, for startup config validation.
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

/// Outcome of one cascade run: the full attempt trail plus either the
/// first compliant answer or exhaustion.
#[derive(Debug)]
pub struct CascadeRun {
    pub answer: Option<String>,
    /// Entry that produced the answer, when there is one.
    pub provider_used: Option<ProviderSpec>,
    pub attempts: Vec<GenerationAttempt>,
    pub deadline_exceeded: bool,
}

impl CascadeRun {
    /// The terminal error, if the run ended in exhaustion.
    pub fn error(&self) -> Option<GenerationError> {
        if self.answer.is_some() {
            return None;
        }
        Some(GenerationError::Exhausted {
            attempts: self.attempts.len(),
            deadline_exceeded: self.deadline_exceeded,
        })
    }
}

/// Ordered provider cascade. Built once at startup; validation rejects
/// entries referencing unregistered providers.
pub struct GenerationCascade {
    registry: ProviderRegistry,
    config: CascadeConfig,
}

impl GenerationCascade {
    pub fn new(registry: ProviderRegistry, config: CascadeConfig) -> Result<Self, ConfigError> {
        config.validate(&registry.names())?;
        Ok(Self { registry, config })
    }

    /// Run the cascade for one prompt.
    ///
    /// `basic_mode` prepends the non-cascaded primary entry. Every
    /// transition to the next entry emits a fallback telemetry event.
    pub async fn generate(
        &self,
        prompt: &str,
        basic_mode: bool,
        request_id: &str,
        sink: &dyn ITelemetrySink,
    ) -> CascadeRun {
        let entries = self.config.effective_entries(basic_mode);
        let deadline = Instant::now() + Duration::from_millis(self.config.overall_deadline_ms);
        let attempt_cap = Duration::from_millis(self.config.attempt_timeout_ms);

        let mut attempts: Vec<GenerationAttempt> = Vec::new();

        for (i, spec) in entries.iter().enumerate() {
            // Validated at startup; a miss here means the registry changed
            // underneath us, which we treat like an entry error.
            let Some(provider) = self.registry.get(&spec.provider) else {
                warn!(provider = %spec.provider, "cascade entry has no registered provider");
                self.emit_fallback(sink, request_id, spec, entries.get(i + 1), FallbackReason::Error);
                continue;
            };

            let mut retries = 0u32;
            let reason = loop {
                let remaining = deadline.checked_duration_since(Instant::now());
                let Some(remaining) = remaining.filter(|r| !r.is_zero()) else {
                    info!(attempts = attempts.len(), "request deadline expired, cascade exhausted");
                    return CascadeRun {
                        answer: None,
                        provider_used: None,
                        attempts,
                        deadline_exceeded: true,
                    };
                };
                let budget = attempt_cap.min(remaining);

                let started_at = Utc::now();
                let t0 = Instant::now();
                let result = timeout(budget, provider.generate(prompt, &spec.model, budget)).await;
                let latency_ms = t0.elapsed().as_millis() as u64;

                let failure = match result {
                    Ok(Ok(text)) => {
                        attempts.push(attempt(spec, started_at, AttemptOutcome::Success, latency_ms));
                        info!(
                            provider = %spec.provider,
                            model = %spec.model,
                            latency_ms,
                            attempts = attempts.len(),
                            "generation succeeded"
                        );
                        return CascadeRun {
                            answer: Some(text),
                            provider_used: Some(spec.clone()),
                            attempts,
                            deadline_exceeded: false,
                        };
                    }
                    Ok(Err(f)) => f,
                    Err(_) => GenerationFailure::Timeout {
                        elapsed_ms: budget.as_millis() as u64,
                    },
                };

                match failure {
                    GenerationFailure::RateLimited { retry_after_ms } => {
                        attempts.push(attempt(spec, started_at, AttemptOutcome::RateLimited, latency_ms));
                        if retries < spec.max_retries {
                            let wait = backoff_within_deadline(
                                crate::backoff::delay(spec.base_backoff_ms, retries, retry_after_ms),
                                deadline,
                            );
                            debug!(
                                provider = %spec.provider,
                                model = %spec.model,
                                retry = retries + 1,
                                wait_ms = wait.as_millis() as u64,
                                "rate limited, backing off"
                            );
                            sleep(wait).await;
                            retries += 1;
                            continue;
                        }
                        break FallbackReason::RateLimit;
                    }
                    GenerationFailure::Blocked => {
                        attempts.push(attempt(spec, started_at, AttemptOutcome::ModerationBlocked, latency_ms));
                        break FallbackReason::Moderation;
                    }
                    GenerationFailure::Timeout { .. } | GenerationFailure::Failed { .. } => {
                        warn!(
                            provider = %spec.provider,
                            model = %spec.model,
                            error = %failure,
                            "cascade entry failed, advancing"
                        );
                        attempts.push(attempt(spec, started_at, AttemptOutcome::Error, latency_ms));
                        break FallbackReason::Error;
                    }
                }
            };

            self.emit_fallback(sink, request_id, spec, entries.get(i + 1), reason);
        }

        info!(attempts = attempts.len(), "cascade exhausted");
        CascadeRun {
            answer: None,
            provider_used: None,
            attempts,
            deadline_exceeded: false,
        }
    }

    fn emit_fallback(
        &self,
        sink: &dyn ITelemetrySink,
        request_id: &str,
        from: &ProviderSpec,
        to: Option<&ProviderSpec>,
        reason: FallbackReason,
    ) {
        let Some(to) = to else {
            return;
        };
        sink.append(TelemetryEvent::FallbackTransition {
            request_id: request_id.to_string(),
            from: from.label(),
            to: to.label(),
            reason,
            timestamp: Utc::now(),
        });
    }
}

fn attempt(
    spec: &ProviderSpec,
    started_at: chrono::DateTime<Utc>,
    outcome: AttemptOutcome,
    latency_ms: u64,
) -> GenerationAttempt {
    GenerationAttempt {
        provider: spec.provider.clone(),
        model: spec.model.clone(),
        started_at,
        outcome,
        latency_ms,
    }
}

/// Clamp a backoff sleep so it never overshoots the request deadline.
fn backoff_within_deadline(wait: Duration, deadline: Instant) -> Duration {
    deadline
        .checked_duration_since(Instant::now())
        .map(|remaining| wait.min(remaining))
        .unwrap_or(Duration::ZERO)
}
