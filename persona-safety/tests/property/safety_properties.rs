use persona_core::traits::ISanitizer;
use persona_safety::SanitizerEngine;
use proptest::prelude::*;

// ── Sanitized output never contains raw PII ────────────────────────────────

proptest! {
    #[test]
    fn sanitized_output_never_contains_raw_email(
        user in "[a-z]{3,8}",
        domain in "[a-z]{3,8}"
    ) {
        let email = format!("{user}@{domain}.com");
        let input = format!("contact: {email}");
        let engine = SanitizerEngine::new();
        let result = engine.sanitize(&input).unwrap();
        prop_assert!(
            !result.text.contains(&email),
            "Raw email found in sanitized output: {}",
            result.text
        );
    }

    #[test]
    fn sanitized_output_never_contains_raw_ssn(
        a in 100u32..999,
        b in 10u32..99,
        c in 1000u32..9999
    ) {
        let ssn = format!("{a}-{b}-{c}");
        let input = format!("the token {ssn} appears here");
        let engine = SanitizerEngine::new();
        let result = engine.sanitize(&input).unwrap();
        prop_assert!(!result.text.contains(&ssn));
    }
}

// ── Sanitization is idempotent ─────────────────────────────────────────────

proptest! {
    #[test]
    fn sanitization_idempotent_arbitrary_text(
        text in "[ -~\n]{0,200}"
    ) {
        let engine = SanitizerEngine::new();
        let first = engine.sanitize(&text).unwrap();
        let second = engine.sanitize(&first.text).unwrap();
        prop_assert_eq!(
            &first.text,
            &second.text,
            "Not idempotent on arbitrary text"
        );
    }
}

// ── Classification is total and pure ───────────────────────────────────────

proptest! {
    #[test]
    fn classify_never_panics(text in "\\PC{0,300}") {
        let _ = persona_safety::classify(&text);
    }

    #[test]
    fn classify_is_deterministic(text in "[ -~]{0,200}") {
        let a = persona_safety::classify(&text);
        let b = persona_safety::classify(&text);
        prop_assert_eq!(a, b);
    }
}
