//! Named defaults for every tunable. Kept in one place so config structs
//! and docs can't drift apart.

/// Candidates requested from the vector store per query.
pub const DEFAULT_TOP_K: usize = 8;
/// RRF smoothing constant. Higher k reduces the influence of top ranks
/// from any single list.
pub const DEFAULT_RRF_K: u32 = 60;
/// Context size cap in basic mode (6 of up to 8 retrieved).
pub const DEFAULT_MAX_CONTEXT_DOCS_BASIC: usize = 6;
/// Context size cap in advanced mode.
pub const DEFAULT_MAX_CONTEXT_DOCS_ADVANCED: usize = 8;
/// Character budget for the assembled context string.
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 6_000;
/// Per-query retrieval timeout. A timed-out query is an empty result.
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 3_000;

/// Paraphrases requested by the multi-query technique.
pub const DEFAULT_MULTI_QUERY_COUNT: usize = 3;
/// Timeout for each technique's transformation prompt.
pub const DEFAULT_TRANSFORM_TIMEOUT_MS: u64 = 5_000;

/// Per-attempt generation timeout.
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 10_000;
/// Request-level deadline bounding the whole cascade.
pub const DEFAULT_OVERALL_DEADLINE_MS: u64 = 45_000;
/// Rate-limit retries per cascade entry before advancing.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Base backoff delay, doubled per retry.
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 2_000;

/// Finalizer word band.
pub const DEFAULT_MIN_WORDS: usize = 50;
pub const DEFAULT_MAX_WORDS_BASIC: usize = 200;
pub const DEFAULT_MAX_WORDS_ADVANCED: usize = 250;
