use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single cascade attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttemptOutcome {
    Success,
    RateLimited,
    ModerationBlocked,
    Error,
}

/// One provider call inside a Generation Cascade run. A run produces an
/// ordered sequence of these, ended by terminal success or exhaustion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationAttempt {
    pub provider: String,
    pub model: String,
    pub started_at: DateTime<Utc>,
    pub outcome: AttemptOutcome,
    pub latency_ms: u64,
}
