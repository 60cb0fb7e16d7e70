use std::collections::BTreeSet;

use persona_core::models::Candidate;
use persona_retrieval::search::fuse;
use proptest::prelude::*;

fn candidate(id: String, score: f64) -> Candidate {
    Candidate {
        title: id.clone(),
        content: String::new(),
        id,
        score,
        category: String::new(),
        tags: BTreeSet::new(),
    }
}

/// A list of candidates with unique ids and scores in [0, 1].
fn unique_list(max_len: usize) -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::btree_set("[a-e][0-9]", 0..=max_len).prop_flat_map(|ids| {
        let ids: Vec<String> = ids.into_iter().collect();
        let len = ids.len();
        prop::collection::vec(0.0f64..=1.0, len).prop_map(move |scores| {
            ids.iter()
                .cloned()
                .zip(scores)
                .map(|(id, s)| candidate(id, s))
                .collect()
        })
    })
}

proptest! {
    // Basic mode ≡ unfused retrieval order: fusing one list is the identity
    // on order and membership.
    #[test]
    fn single_list_fusion_preserves_order(list in unique_list(10)) {
        let fused = fuse(&[list.clone()], 60);
        let fused_ids: Vec<&str> = fused.iter().map(|f| f.candidate.id.as_str()).collect();
        let original_ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(fused_ids, original_ids);
    }

    // Fused score is monotonically non-decreasing in the number of lists a
    // candidate appears in, holding per-list rank fixed.
    #[test]
    fn fused_score_monotone_in_appearances(
        rank in 0usize..5,
        appearances in 1usize..6,
        filler in unique_list(5),
    ) {
        let mut filler = filler;
        filler.retain(|c| c.id != "probe");
        prop_assume!(filler.len() >= rank);

        let build = |n: usize| -> Vec<Vec<Candidate>> {
            (0..n)
                .map(|_| {
                    let mut list = filler.clone();
                    list.insert(rank, candidate("probe".to_string(), 0.5));
                    list
                })
                .collect()
        };

        let score_of = |lists: &[Vec<Candidate>]| {
            fuse(lists, 60)
                .into_iter()
                .find(|f| f.candidate.id == "probe")
                .map(|f| f.fused_score)
                .unwrap()
        };

        let fewer = score_of(&build(appearances));
        let more = score_of(&build(appearances + 1));
        prop_assert!(more >= fewer);
    }

    // Output never contains duplicate ids, whatever the overlap across lists.
    #[test]
    fn fusion_never_emits_duplicate_ids(
        a in unique_list(8),
        b in unique_list(8),
        c in unique_list(8),
    ) {
        let fused = fuse(&[a, b, c], 60);
        let mut ids: Vec<&str> = fused.iter().map(|f| f.candidate.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(before, ids.len());
    }

    // The tie-break chain makes fusion a pure function of its input.
    #[test]
    fn fusion_is_deterministic(
        a in unique_list(8),
        b in unique_list(8),
    ) {
        let first = fuse(&[a.clone(), b.clone()], 60);
        let second = fuse(&[a, b], 60);
        let first_ids: Vec<&str> = first.iter().map(|f| f.candidate.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|f| f.candidate.id.as_str()).collect();
        prop_assert_eq!(first_ids, second_ids);
    }
}
