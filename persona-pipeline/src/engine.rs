//! RagEngine: the request orchestrator.
//!
//! `query` never returns `Err`. Refusals, empty-knowledge answers, and
//! generation exhaustion are all expressed through the `RagResult`
//! contract so every boundary gets the same shape.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use persona_core::config::{AdvancedOverrides, ProviderSpec, RagConfig};
use persona_core::errors::ConfigError;
use persona_core::models::{
    FallbackReason, GenerationAttempt, Mode, RagMetadata, RagResult, TelemetryEvent,
};
use persona_core::traits::{
    IEmbeddingProvider, IGenerationProvider, ITelemetrySink, IVectorSearch,
};
use persona_generation::{GenerationCascade, ProviderRegistry, ResponseFinalizer};
use persona_retrieval::search::fuse;
use persona_retrieval::{ContextBuilder, QueryTransformer, Retriever};
use persona_safety::{classify, SanitizerEngine};
use persona_telemetry::{request_span, NullSink};

use crate::prompt;

/// Assembles a `RagEngine` from its collaborators, validating the
/// configuration against the provider registry at build time.
pub struct RagEngineBuilder {
    config: RagConfig,
    transform_provider: Arc<dyn IGenerationProvider>,
    transform_model: Option<String>,
    search: Arc<dyn IVectorSearch>,
    embedder: Arc<dyn IEmbeddingProvider>,
    registry: ProviderRegistry,
    sink: Arc<dyn ITelemetrySink>,
}

impl RagEngineBuilder {
    pub fn new(
        config: RagConfig,
        transform_provider: Arc<dyn IGenerationProvider>,
        search: Arc<dyn IVectorSearch>,
        embedder: Arc<dyn IEmbeddingProvider>,
        registry: ProviderRegistry,
    ) -> Self {
        Self {
            config,
            transform_provider,
            transform_model: None,
            search,
            embedder,
            registry,
            sink: Arc::new(NullSink),
        }
    }

    /// Model used for transformation prompts. Defaults to the first
    /// cascade entry's model.
    pub fn transform_model(mut self, model: impl Into<String>) -> Self {
        self.transform_model = Some(model.into());
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ITelemetrySink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> Result<RagEngine, ConfigError> {
        self.config.validate(&self.registry.names())?;

        let transform_model = match self.transform_model {
            Some(m) => m,
            None => self
                .config
                .cascade
                .entries
                .first()
                .or(self.config.cascade.primary.as_ref())
                .map(|e| e.model.clone())
                .ok_or(ConfigError::EmptyCascade)?,
        };

        let transformer = QueryTransformer::new(self.transform_provider, transform_model);
        let retriever = Retriever::new(
            self.search,
            self.embedder,
            self.config.retrieval.clone(),
        );
        let cascade = GenerationCascade::new(self.registry, self.config.cascade.clone())?;

        Ok(RagEngine {
            config: self.config,
            transformer,
            retriever,
            cascade,
            sanitizer: SanitizerEngine::new(),
            sink: self.sink,
        })
    }
}

/// The full pipeline behind one method.
pub struct RagEngine {
    config: RagConfig,
    transformer: QueryTransformer,
    retriever: Retriever,
    cascade: GenerationCascade,
    sanitizer: SanitizerEngine,
    sink: Arc<dyn ITelemetrySink>,
}

impl RagEngine {
    pub fn builder(
        config: RagConfig,
        transform_provider: Arc<dyn IGenerationProvider>,
        search: Arc<dyn IVectorSearch>,
        embedder: Arc<dyn IEmbeddingProvider>,
        registry: ProviderRegistry,
    ) -> RagEngineBuilder {
        RagEngineBuilder::new(config, transform_provider, search, embedder, registry)
    }

    /// Answer one question. Infallible by contract: every failure mode
    /// maps onto a `RagResult` variant.
    pub async fn query(
        &self,
        question: &str,
        mode: Mode,
        overrides: Option<&AdvancedOverrides>,
    ) -> RagResult {
        let request_id = Uuid::new_v4().to_string();
        let span = request_span!(request_id, mode);
        self.run(question, mode, overrides, &request_id)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        question: &str,
        mode: Mode,
        overrides: Option<&AdvancedOverrides>,
        request_id: &str,
    ) -> RagResult {
        let started = Instant::now();
        let advanced = mode == Mode::Advanced;

        let trimmed = question.trim();
        if trimmed.is_empty() {
            return RagResult::input_rejected(mode);
        }

        // Safety gate: PII-seeking questions never reach retrieval or
        // generation.
        let class = classify(trimmed);
        if class.is_pii {
            info!(request_id, "policy refusal");
            self.sink.append(TelemetryEvent::PolicyRefusal {
                request_id: request_id.to_string(),
                timestamp: Utc::now(),
            });
            let metadata = finish(RagMetadata::new(mode), started);
            self.emit_completed(request_id, mode, true, None, started, 0);
            return RagResult::policy_refusal(metadata);
        }

        let advanced_cfg = match overrides {
            Some(o) => o.apply(&self.config.advanced),
            None => self.config.advanced.clone(),
        };
        let outcome = self.transformer.transform(trimmed, mode, &advanced_cfg).await;

        let mut metadata = RagMetadata::new(mode);
        metadata.techniques_used = outcome.techniques_used.clone();
        metadata.transformed_queries = outcome
            .queries
            .iter()
            .filter(|q| q.technique.is_some())
            .map(|q| q.text.clone())
            .collect();

        let results = match self.retriever.retrieve(&outcome.queries, class).await {
            Ok(r) => r,
            Err(e) => {
                warn!(request_id, error = %e, "retrieval failed entirely, degrading to static answer");
                self.emit_empty_result(request_id);
                self.emit_completed(request_id, mode, true, None, started, 0);
                return RagResult::no_information(finish(metadata, started));
            }
        };

        for idx in &results.timed_out {
            self.sink.append(TelemetryEvent::RetrievalTimeout {
                request_id: request_id.to_string(),
                query: outcome.queries[*idx].text.clone(),
                timeout_ms: self.config.retrieval.query_timeout_ms,
                timestamp: Utc::now(),
            });
        }

        if results.is_exhausted() {
            self.emit_empty_result(request_id);
            self.emit_completed(request_id, mode, true, None, started, 0);
            return RagResult::no_information(finish(metadata, started));
        }

        let fused = fuse(&results.lists, self.config.retrieval.rrf_k);
        let builder = ContextBuilder::new(&self.sanitizer, &self.config.retrieval);
        let (ranked, context) =
            match builder.build(fused, self.config.retrieval.max_context_docs(advanced)) {
                Ok(v) => v,
                Err(e) => {
                    self.emit_completed(request_id, mode, false, None, started, 0);
                    return RagResult::failed(e.to_string(), finish(metadata, started));
                }
            };
        if ranked.is_empty() {
            self.emit_empty_result(request_id);
            self.emit_completed(request_id, mode, true, None, started, 0);
            return RagResult::no_information(finish(metadata, started));
        }

        let answer_prompt = prompt::answer_prompt(&context, trimmed);
        let run = self
            .cascade
            .generate(&answer_prompt, !advanced, request_id, self.sink.as_ref())
            .await;
        let fallbacks = fallback_count(&run.attempts);

        let Some(raw_answer) = run.answer else {
            let error = run
                .error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "generation failed".to_string());
            self.emit_completed(request_id, mode, false, None, started, fallbacks);
            return RagResult::failed(error, finish(metadata, started));
        };

        let finalizer = ResponseFinalizer::new(&self.sanitizer);
        let answer = match finalizer.finalize(
            &raw_answer,
            self.config.answer.min_words,
            self.config.answer.max_words(advanced),
        ) {
            Ok(a) => a,
            Err(e) => {
                self.emit_completed(request_id, mode, false, None, started, fallbacks);
                return RagResult::failed(e.to_string(), finish(metadata, started));
            }
        };

        self.emit_completed(
            request_id,
            mode,
            true,
            run.provider_used.as_ref(),
            started,
            fallbacks,
        );
        RagResult::answered(answer, ranked.sources(), finish(metadata, started))
    }

    fn emit_completed(
        &self,
        request_id: &str,
        mode: Mode,
        success: bool,
        provider: Option<&ProviderSpec>,
        started: Instant,
        fallbacks: u32,
    ) {
        self.sink.append(TelemetryEvent::RequestCompleted {
            request_id: request_id.to_string(),
            mode,
            success,
            provider: provider.map(|p| p.provider.clone()),
            model: provider.map(|p| p.model.clone()),
            latency_ms: started.elapsed().as_millis() as u64,
            fallbacks,
            timestamp: Utc::now(),
        });
    }

    /// Retrieval found nothing; the request falls back to the static
    /// low-confidence answer.
    fn emit_empty_result(&self, request_id: &str) {
        self.sink.append(TelemetryEvent::FallbackTransition {
            request_id: request_id.to_string(),
            from: "retrieval".to_string(),
            to: "static_answer".to_string(),
            reason: FallbackReason::EmptyResult,
            timestamp: Utc::now(),
        });
    }
}

fn finish(mut metadata: RagMetadata, started: Instant) -> RagMetadata {
    metadata.processing_time_ms = started.elapsed().as_millis() as u64;
    metadata
}

/// Number of transitions between distinct cascade entries in the
/// attempt trail.
fn fallback_count(attempts: &[GenerationAttempt]) -> u32 {
    attempts
        .windows(2)
        .filter(|w| w[0].provider != w[1].provider || w[0].model != w[1].model)
        .count() as u32
}
