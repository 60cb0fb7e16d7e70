//! Query transformation techniques for advanced mode.
//!
//! Each enabled technique contributes queries independently; techniques
//! are additive, not mutually exclusive. A failed or timed-out technique
//! drops its contribution silently (logged) and the pipeline proceeds
//! with whatever queries remain.

mod hyde;
mod prompts;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use persona_core::config::AdvancedConfig;
use persona_core::models::{Mode, SearchQuery, Technique};
use persona_core::traits::IGenerationProvider;

/// Queries produced from one question, plus which techniques contributed.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    /// Ordered derived queries. Order is preserved for diagnostics only.
    pub queries: Vec<SearchQuery>,
    pub techniques_used: Vec<Technique>,
}

impl TransformOutcome {
    fn identity(question: &str) -> Self {
        Self {
            queries: vec![SearchQuery::original(question)],
            techniques_used: Vec::new(),
        }
    }
}

/// Transforms a question into one or more search queries using a
/// generation provider for the technique prompts.
pub struct QueryTransformer {
    provider: Arc<dyn IGenerationProvider>,
    model: String,
}

impl QueryTransformer {
    pub fn new(provider: Arc<dyn IGenerationProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Produce the query set for a question.
    ///
    /// Basic mode (or advanced with every technique disabled) is the
    /// identity transform: `[question]`.
    pub async fn transform(
        &self,
        question: &str,
        mode: Mode,
        cfg: &AdvancedConfig,
    ) -> TransformOutcome {
        if mode == Mode::Basic || !cfg.any_enabled() {
            return TransformOutcome::identity(question);
        }

        let budget = Duration::from_millis(cfg.transform_timeout_ms);
        let mut queries = vec![SearchQuery::original(question)];
        let mut used = Vec::new();

        if cfg.multi_query {
            let prompt = prompts::multi_query_prompt(question, cfg.multi_query_count);
            if let Some(lines) = self.ask_lines(&prompt, budget, cfg.multi_query_count).await {
                let added = push_unique(&mut queries, lines, Technique::MultiQuery);
                if added > 0 {
                    used.push(Technique::MultiQuery);
                }
            } else {
                warn!(technique = "multi_query", "transformation failed, dropping contribution");
            }
        }

        if cfg.decomposition {
            let prompt = prompts::decomposition_prompt(question);
            if let Some(lines) = self.ask_lines(&prompt, budget, prompts::MAX_SUB_QUESTIONS).await {
                let added = push_unique(&mut queries, lines, Technique::Decomposition);
                if added > 0 {
                    used.push(Technique::Decomposition);
                }
            } else {
                warn!(technique = "decomposition", "transformation failed, dropping contribution");
            }
        }

        if cfg.step_back {
            let prompt = prompts::step_back_prompt(question);
            if let Some(lines) = self.ask_lines(&prompt, budget, 1).await {
                let added = push_unique(&mut queries, lines, Technique::StepBack);
                if added > 0 {
                    used.push(Technique::StepBack);
                }
            } else {
                warn!(technique = "step_back", "transformation failed, dropping contribution");
            }
        }

        if cfg.hyde {
            match self.ask_raw(&hyde::hyde_prompt(question), budget).await {
                Some(passage) if !passage.trim().is_empty() => {
                    queries.push(SearchQuery::derived(passage.trim(), Technique::Hyde));
                    used.push(Technique::Hyde);
                }
                _ => {
                    warn!(technique = "hyde", "transformation failed, dropping contribution");
                }
            }
        }

        // RAG-fusion only tags the run for fusion diagnostics; RRF itself
        // always runs over whatever queries exist.
        if cfg.rag_fusion && queries.len() > 1 {
            used.push(Technique::RagFusion);
        }

        if queries.is_empty() {
            return TransformOutcome::identity(question);
        }

        debug!(
            queries = queries.len(),
            techniques = used.len(),
            "query transformation complete"
        );

        TransformOutcome {
            queries,
            techniques_used: used,
        }
    }

    /// One transformation prompt, parsed into at most `max` query lines.
    async fn ask_lines(&self, prompt: &str, budget: Duration, max: usize) -> Option<Vec<String>> {
        let raw = self.ask_raw(prompt, budget).await?;
        let lines = prompts::parse_query_lines(&raw, max);
        if lines.is_empty() {
            None
        } else {
            Some(lines)
        }
    }

    async fn ask_raw(&self, prompt: &str, budget: Duration) -> Option<String> {
        match timeout(budget, self.provider.generate(prompt, &self.model, budget)).await {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                debug!(error = %e, "transformation prompt failed");
                None
            }
            Err(_) => {
                debug!(timeout_ms = budget.as_millis() as u64, "transformation prompt timed out");
                None
            }
        }
    }
}

/// Append queries that aren't already present (case-insensitive).
/// Returns how many were added.
fn push_unique(queries: &mut Vec<SearchQuery>, texts: Vec<String>, technique: Technique) -> usize {
    let mut added = 0;
    for text in texts {
        let lowered = text.to_lowercase();
        if queries.iter().any(|q| q.text.to_lowercase() == lowered) {
            continue;
        }
        queries.push(SearchQuery::derived(text, technique));
        added += 1;
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use persona_core::errors::GenerationFailure;

    struct ScriptedProvider {
        response: Result<String, GenerationFailure>,
    }

    #[async_trait]
    impl IGenerationProvider for ScriptedProvider {
        async fn generate(
            &self,
            _prompt: &str,
            _model: &str,
            _timeout: Duration,
        ) -> Result<String, GenerationFailure> {
            self.response.clone()
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn transformer(response: Result<String, GenerationFailure>) -> QueryTransformer {
        QueryTransformer::new(Arc::new(ScriptedProvider { response }), "test-model")
    }

    #[tokio::test]
    async fn basic_mode_is_identity() {
        let t = transformer(Ok("unused".into()));
        let out = t
            .transform("What do you do?", Mode::Basic, &AdvancedConfig::default())
            .await;
        assert_eq!(out.queries.len(), 1);
        assert_eq!(out.queries[0].text, "What do you do?");
        assert!(out.techniques_used.is_empty());
    }

    #[tokio::test]
    async fn all_techniques_disabled_behaves_as_basic() {
        let cfg = AdvancedConfig {
            multi_query: false,
            rag_fusion: false,
            decomposition: false,
            step_back: false,
            hyde: false,
            ..Default::default()
        };
        let t = transformer(Ok("paraphrase".into()));
        let out = t.transform("question", Mode::Advanced, &cfg).await;
        assert_eq!(out.queries.len(), 1);
        assert!(out.techniques_used.is_empty());
    }

    #[tokio::test]
    async fn multi_query_adds_paraphrases() {
        let t = transformer(Ok("first paraphrase\nsecond paraphrase\nthird one".into()));
        let cfg = AdvancedConfig {
            multi_query: true,
            multi_query_count: 3,
            rag_fusion: false,
            ..Default::default()
        };
        let out = t.transform("original", Mode::Advanced, &cfg).await;
        assert_eq!(out.queries.len(), 4); // original + 3 paraphrases
        assert!(out.techniques_used.contains(&Technique::MultiQuery));
        assert_eq!(out.queries[0].technique, None);
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_original_question() {
        let t = transformer(Err(GenerationFailure::Failed {
            reason: "boom".into(),
        }));
        let cfg = AdvancedConfig {
            multi_query: true,
            hyde: true,
            ..Default::default()
        };
        let out = t.transform("the question", Mode::Advanced, &cfg).await;
        assert_eq!(out.queries.len(), 1);
        assert_eq!(out.queries[0].text, "the question");
        assert!(!out.techniques_used.contains(&Technique::MultiQuery));
    }

    #[tokio::test]
    async fn hyde_query_is_marked_as_embedding_seed() {
        let t = transformer(Ok("A hypothetical answer passage.".into()));
        let cfg = AdvancedConfig {
            multi_query: false,
            rag_fusion: false,
            hyde: true,
            ..Default::default()
        };
        let out = t.transform("question", Mode::Advanced, &cfg).await;
        let hyde = out.queries.iter().find(|q| q.is_embedding_seed()).unwrap();
        assert_eq!(hyde.text, "A hypothetical answer passage.");
        assert!(out.techniques_used.contains(&Technique::Hyde));
    }

    #[tokio::test]
    async fn duplicate_paraphrases_are_dropped() {
        let t = transformer(Ok("Original\noriginal\nsomething new".into()));
        let cfg = AdvancedConfig {
            multi_query: true,
            rag_fusion: false,
            ..Default::default()
        };
        let out = t.transform("original", Mode::Advanced, &cfg).await;
        // "Original"/"original" collide with the original question.
        assert_eq!(out.queries.len(), 2);
    }

    #[tokio::test]
    async fn rag_fusion_is_recorded_when_multiple_queries_exist() {
        let t = transformer(Ok("alt one\nalt two".into()));
        let cfg = AdvancedConfig {
            multi_query: true,
            rag_fusion: true,
            ..Default::default()
        };
        let out = t.transform("q", Mode::Advanced, &cfg).await;
        assert!(out.techniques_used.contains(&Technique::RagFusion));
    }
}
