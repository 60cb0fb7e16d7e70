use persona_generation::backoff;
use persona_generation::ResponseFinalizer;
use persona_safety::SanitizerEngine;
use proptest::prelude::*;

/// Plain words only, so sanitization is the identity and the word band
/// is the only transformation under test.
fn plain_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..300)
}

fn finalize(words: &[String], min: usize, max: usize) -> String {
    let sanitizer = SanitizerEngine::new();
    ResponseFinalizer::new(&sanitizer)
        .finalize(&words.join(" "), min, max)
        .unwrap()
}

proptest! {
    // The finalized answer never exceeds the word band ceiling.
    #[test]
    fn finalized_answer_never_exceeds_max_words(
        words in plain_words(),
        min in 0usize..50,
        max in 50usize..250,
    ) {
        let out = finalize(&words, min, max);
        prop_assert!(out.split_whitespace().count() <= max);
    }

    // Answers already inside the band come back verbatim. Short answers
    // are never padded.
    #[test]
    fn in_band_answer_is_identity(words in plain_words()) {
        let max = 250usize;
        prop_assume!(words.len() <= max);
        let out = finalize(&words, 50, max);
        prop_assert_eq!(out, words.join(" "));
    }

    // Truncation keeps a prefix of the original words, never invents
    // content.
    #[test]
    fn truncation_is_a_word_prefix(words in plain_words(), max in 1usize..100) {
        prop_assume!(words.len() > max && max > 1);
        let out = finalize(&words, 1, max);
        let out_words: Vec<&str> = out.split_whitespace().collect();
        prop_assert_eq!(out_words.len(), max);
        for (got, expected) in out_words.iter().zip(words.iter()) {
            prop_assert_eq!(*got, expected.as_str());
        }
    }

    // Computed backoff stays within [exp, exp + exp/4] where exp is the
    // capped exponential component.
    #[test]
    fn backoff_stays_in_jitter_band(base in 1u64..5_000, retry in 0u32..20) {
        let exp = base.saturating_mul(1u64 << retry.min(16)).min(30_000);
        let d = backoff::delay(base, retry, None).as_millis() as u64;
        prop_assert!(d >= exp);
        prop_assert!(d <= exp + exp / 4);
    }

    // A server-suggested delay is honored exactly, up to the cap.
    #[test]
    fn server_suggested_delay_is_exact(base in 1u64..5_000, after in 0u64..60_000) {
        let d = backoff::delay(base, 3, Some(after)).as_millis() as u64;
        prop_assert_eq!(d, after.min(30_000));
    }
}
