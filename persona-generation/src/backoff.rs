//! Exponential backoff with jitter for rate-limit retries.

use std::time::Duration;

use rand::Rng;

/// Cap on the exponential component, before jitter.
const MAX_BACKOFF_MS: u64 = 30_000;

/// Delay before retry number `retry` (0-based).
///
/// A server-suggested `retry_after_ms` overrides the computed backoff.
/// Otherwise: `base * 2^retry`, capped, plus uniform jitter of up to a
/// quarter of the exponential component so synchronized clients spread out.
pub fn delay(base_ms: u64, retry: u32, retry_after_ms: Option<u64>) -> Duration {
    if let Some(ms) = retry_after_ms {
        return Duration::from_millis(ms.min(MAX_BACKOFF_MS));
    }
    let exp = base_ms
        .saturating_mul(1u64 << retry.min(16))
        .min(MAX_BACKOFF_MS);
    let jitter = if exp == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..=exp / 4)
    };
    Duration::from_millis(exp + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_per_retry_within_jitter_band() {
        for retry in 0..4u32 {
            let base = 2_000u64;
            let expected = base * (1 << retry);
            let d = delay(base, retry, None).as_millis() as u64;
            assert!(d >= expected, "retry {retry}: {d} < {expected}");
            assert!(d <= expected + expected / 4, "retry {retry}: {d} too large");
        }
    }

    #[test]
    fn caps_at_max_backoff() {
        let d = delay(2_000, 16, None).as_millis() as u64;
        assert!(d <= MAX_BACKOFF_MS + MAX_BACKOFF_MS / 4);
    }

    #[test]
    fn server_suggested_delay_wins() {
        let d = delay(2_000, 3, Some(500));
        assert_eq!(d, Duration::from_millis(500));
    }

    #[test]
    fn zero_base_never_panics() {
        let d = delay(0, 0, None);
        assert_eq!(d, Duration::ZERO);
    }
}
