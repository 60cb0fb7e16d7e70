//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Merges the per-query candidate lists into one ranking without score
//! normalization across queries. Deduplicates by candidate id and imposes
//! a total order so results are deterministic and testable:
//! fused score desc → best single-query rank asc → retrieval score desc
//! → id asc.

use std::collections::HashMap;

use persona_core::models::{Candidate, FusedCandidate};

struct Accum {
    candidate: Candidate,
    fused_score: f64,
    best_rank: usize,
}

/// Fuse per-query result lists with RRF.
///
/// `rrf_k` is the smoothing constant (default 60). Ranks are 1-based;
/// a candidate absent from a list contributes 0 for that list. For a
/// single input list the output preserves the list's original order.
pub fn fuse(per_query: &[Vec<Candidate>], rrf_k: u32) -> Vec<FusedCandidate> {
    let mut accum: HashMap<String, Accum> = HashMap::new();

    for list in per_query {
        let mut seen_in_list: Vec<&str> = Vec::new();
        for (i, candidate) in list.iter().enumerate() {
            // Duplicate id inside one list: only the first (best) rank counts.
            if seen_in_list.contains(&candidate.id.as_str()) {
                continue;
            }
            let rank = i + 1;
            let rrf = 1.0 / (rrf_k as f64 + rank as f64);
            match accum.get_mut(&candidate.id) {
                Some(entry) => {
                    entry.fused_score += rrf;
                    entry.best_rank = entry.best_rank.min(rank);
                    // Highest retrieval score wins for the retained copy.
                    if candidate.score > entry.candidate.score {
                        entry.candidate = candidate.clone();
                    }
                }
                None => {
                    accum.insert(
                        candidate.id.clone(),
                        Accum {
                            candidate: candidate.clone(),
                            fused_score: rrf,
                            best_rank: rank,
                        },
                    );
                }
            }
            seen_in_list.push(candidate.id.as_str());
        }
    }

    let mut fused: Vec<FusedCandidate> = accum
        .into_values()
        .map(|a| FusedCandidate {
            candidate: a.candidate,
            fused_score: a.fused_score,
            best_rank: a.best_rank,
        })
        .collect();

    fused.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.best_rank.cmp(&b.best_rank))
            .then_with(|| {
                b.candidate
                    .score
                    .partial_cmp(&a.candidate.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });

    fused
}
