/// Outcome of a single provider call. Drives the cascade state machine:
/// `RateLimited` is retried with backoff, everything else advances to the
/// next cascade entry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationFailure {
    #[error("rate limited")]
    RateLimited {
        /// Server-suggested delay, if the provider reported one.
        retry_after_ms: Option<u64>,
    },

    #[error("blocked by content moderation")]
    Blocked,

    #[error("timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("provider error: {reason}")]
    Failed { reason: String },
}

/// Terminal generation errors. Only `Exhausted` ever reaches the caller;
/// per-entry failures are recovered by cascade advancement.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation cascade exhausted after {attempts} attempts")]
    Exhausted {
        attempts: usize,
        /// True when the request deadline ended the cascade early.
        deadline_exceeded: bool,
    },
}
