//! Concurrent per-query retrieval with a fan-in barrier.
//!
//! One search call per query, all in flight at once, each under its own
//! timeout. A failed or timed-out query contributes an empty candidate
//! list; the overall retrieval only fails when every query failed.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

use persona_core::config::RetrievalConfig;
use persona_core::errors::{PersonaResult, RetrievalError};
use persona_core::models::{Candidate, QuestionClass, SearchQuery};
use persona_core::traits::{IEmbeddingProvider, IVectorSearch};

/// Per-query result lists, in query order.
#[derive(Debug, Clone, Default)]
pub struct QueryResults {
    pub lists: Vec<Vec<Candidate>>,
    /// Queries that timed out (indices into `lists`), for telemetry.
    pub timed_out: Vec<usize>,
}

impl QueryResults {
    /// True when no query produced any candidate.
    pub fn is_exhausted(&self) -> bool {
        self.lists.iter().all(|l| l.is_empty())
    }
}

/// Issues retrieval calls against the external vector store.
pub struct Retriever {
    search: Arc<dyn IVectorSearch>,
    embedder: Arc<dyn IEmbeddingProvider>,
    config: RetrievalConfig,
}

impl Retriever {
    pub fn new(
        search: Arc<dyn IVectorSearch>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            search,
            embedder,
            config,
        }
    }

    /// Retrieve top-k candidates for every query concurrently.
    ///
    /// For behavioral questions each per-query list is stably partitioned
    /// so `star`/`behavioral` tagged candidates come first.
    pub async fn retrieve(
        &self,
        queries: &[SearchQuery],
        class: QuestionClass,
    ) -> PersonaResult<QueryResults> {
        let k = self.config.top_k;
        let per_query_timeout = Duration::from_millis(self.config.query_timeout_ms);

        let mut set: JoinSet<(usize, Result<Vec<Candidate>, RetrievalError>, bool)> =
            JoinSet::new();
        for (idx, query) in queries.iter().cloned().enumerate() {
            let search = Arc::clone(&self.search);
            let embedder = Arc::clone(&self.embedder);
            set.spawn(async move {
                match timeout(per_query_timeout, run_one(search, embedder, &query, k)).await {
                    Ok(result) => (idx, result, false),
                    Err(_) => (
                        idx,
                        Err(RetrievalError::QueryTimeout {
                            query: query.text.clone(),
                            timeout_ms: per_query_timeout.as_millis() as u64,
                        }),
                        true,
                    ),
                }
            });
        }

        // Fan-in barrier: wait for every query (or its timeout).
        let mut lists: Vec<Vec<Candidate>> = vec![Vec::new(); queries.len()];
        let mut timed_out = Vec::new();
        let mut failures = 0usize;
        while let Some(joined) = set.join_next().await {
            let Ok((idx, result, was_timeout)) = joined else {
                failures += 1;
                continue;
            };
            match result {
                Ok(candidates) => {
                    lists[idx] = candidates;
                }
                Err(e) => {
                    warn!(query_index = idx, error = %e, "retrieval query failed, contributing empty list");
                    failures += 1;
                    if was_timeout {
                        timed_out.push(idx);
                    }
                }
            }
        }

        if !queries.is_empty() && failures == queries.len() {
            return Err(RetrievalError::AllQueriesFailed {
                queries: queries.len(),
            }
            .into());
        }

        if class.is_behavioral {
            for list in &mut lists {
                behavioral_partition(list);
            }
        }

        debug!(
            queries = queries.len(),
            candidates = lists.iter().map(Vec::len).sum::<usize>(),
            timed_out = timed_out.len(),
            "retrieval fan-out complete"
        );

        timed_out.sort_unstable();
        Ok(QueryResults { lists, timed_out })
    }
}

/// Run one retrieval call. HyDE seeds are embedded first and searched by
/// vector; everything else is a text search.
async fn run_one(
    search: Arc<dyn IVectorSearch>,
    embedder: Arc<dyn IEmbeddingProvider>,
    query: &SearchQuery,
    k: usize,
) -> Result<Vec<Candidate>, RetrievalError> {
    let result = if query.is_embedding_seed() {
        let embedding = embedder
            .embed(&query.text)
            .map_err(|e| RetrievalError::EmbeddingFailed {
                reason: e.to_string(),
            })?;
        search.search_embedding(&embedding, k).await
    } else {
        search.search_text(&query.text, k).await
    };

    result.map_err(|e| RetrievalError::SearchFailed {
        reason: e.to_string(),
    })
}

/// Stable partition: behavioral-tagged candidates first, each side in its
/// original relative order.
fn behavioral_partition(list: &mut Vec<Candidate>) {
    let (behavioral, rest): (Vec<Candidate>, Vec<Candidate>) =
        list.drain(..).partition(Candidate::is_behavioral);
    list.extend(behavioral);
    list.extend(rest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeSet;

    fn candidate(id: &str, score: f64, tags: &[&str]) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: format!("title-{id}"),
            content: format!("content for {id}"),
            score,
            category: "experience".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    struct FixedSearch {
        results: Vec<Candidate>,
        fail: bool,
    }

    #[async_trait]
    impl IVectorSearch for FixedSearch {
        async fn search_text(&self, _q: &str, k: usize) -> PersonaResult<Vec<Candidate>> {
            if self.fail {
                return Err(RetrievalError::SearchFailed {
                    reason: "backend down".into(),
                }
                .into());
            }
            Ok(self.results.iter().take(k).cloned().collect())
        }

        async fn search_embedding(&self, _e: &[f32], k: usize) -> PersonaResult<Vec<Candidate>> {
            self.search_text("", k).await
        }
    }

    struct FixedEmbedder;

    impl IEmbeddingProvider for FixedEmbedder {
        fn embed(&self, _text: &str) -> PersonaResult<Vec<f32>> {
            Ok(vec![0.1; 8])
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn retriever(results: Vec<Candidate>, fail: bool) -> Retriever {
        Retriever::new(
            Arc::new(FixedSearch { results, fail }),
            Arc::new(FixedEmbedder),
            RetrievalConfig::default(),
        )
    }

    fn neutral() -> QuestionClass {
        QuestionClass {
            is_pii: false,
            is_behavioral: false,
        }
    }

    #[tokio::test]
    async fn one_list_per_query_in_order() {
        let r = retriever(vec![candidate("a", 0.9, &[])], false);
        let queries = vec![
            SearchQuery::original("q1"),
            SearchQuery::original("q2"),
            SearchQuery::original("q3"),
        ];
        let out = r.retrieve(&queries, neutral()).await.unwrap();
        assert_eq!(out.lists.len(), 3);
        assert!(out.lists.iter().all(|l| l.len() == 1));
    }

    #[tokio::test]
    async fn all_queries_failing_is_an_error() {
        let r = retriever(vec![], true);
        let queries = vec![SearchQuery::original("q1"), SearchQuery::original("q2")];
        let err = r.retrieve(&queries, neutral()).await.unwrap_err();
        assert!(err.to_string().contains("all 2 retrieval queries"));
    }

    #[tokio::test]
    async fn empty_results_are_not_an_error() {
        let r = retriever(vec![], false);
        let queries = vec![SearchQuery::original("q1")];
        let out = r.retrieve(&queries, neutral()).await.unwrap();
        assert!(out.is_exhausted());
        assert!(out.timed_out.is_empty());
    }

    #[tokio::test]
    async fn behavioral_candidates_move_to_front_stably() {
        let r = retriever(
            vec![
                candidate("plain-1", 0.9, &[]),
                candidate("star-1", 0.8, &["star"]),
                candidate("plain-2", 0.7, &[]),
                candidate("star-2", 0.6, &["behavioral"]),
            ],
            false,
        );
        let class = QuestionClass {
            is_pii: false,
            is_behavioral: true,
        };
        let out = r
            .retrieve(&[SearchQuery::original("q")], class)
            .await
            .unwrap();
        let ids: Vec<&str> = out.lists[0].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["star-1", "star-2", "plain-1", "plain-2"]);
    }

    #[tokio::test]
    async fn non_behavioral_question_keeps_original_order() {
        let r = retriever(
            vec![
                candidate("plain-1", 0.9, &[]),
                candidate("star-1", 0.8, &["star"]),
            ],
            false,
        );
        let out = r
            .retrieve(&[SearchQuery::original("q")], neutral())
            .await
            .unwrap();
        let ids: Vec<&str> = out.lists[0].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["plain-1", "star-1"]);
    }
}
