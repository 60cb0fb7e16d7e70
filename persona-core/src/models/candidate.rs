use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::BEHAVIORAL_TAGS;

/// A knowledge-base passage returned by the vector store for one query.
///
/// The same `id` may appear in multiple per-query result sets; fusion
/// deduplicates by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Retrieval relevance score in [0, 1].
    pub score: f64,
    pub category: String,
    pub tags: BTreeSet<String>,
}

impl Candidate {
    /// Whether this passage is a behavioral (STAR-style) example.
    pub fn is_behavioral(&self) -> bool {
        BEHAVIORAL_TAGS.iter().any(|t| self.tags.contains(*t))
    }
}

/// A candidate after RRF fusion across per-query result lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusedCandidate {
    pub candidate: Candidate,
    /// Fused RRF score (higher = more relevant).
    pub fused_score: f64,
    /// Best (lowest) 1-based rank this candidate held in any single query.
    pub best_rank: usize,
}

/// Ordered, deduplicated fusion output, truncated to the configured
/// count and character budget. Never contains duplicate candidate ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankedContext {
    pub entries: Vec<FusedCandidate>,
}

impl RankedContext {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The candidates in fused order, for source attribution.
    pub fn sources(&self) -> Vec<Candidate> {
        self.entries.iter().map(|e| e.candidate.clone()).collect()
    }
}
