use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Mode;

/// Why a fallback transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    RateLimit,
    Error,
    Moderation,
    EmptyResult,
}

/// A reliability event recorded against the append-only telemetry sink.
///
/// Appends are best-effort: losing one must never fail the user-facing
/// request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryEvent {
    RequestCompleted {
        request_id: String,
        mode: Mode,
        success: bool,
        /// Provider that produced the final answer, if any.
        provider: Option<String>,
        model: Option<String>,
        latency_ms: u64,
        fallbacks: u32,
        timestamp: DateTime<Utc>,
    },
    FallbackTransition {
        request_id: String,
        from: String,
        to: String,
        reason: FallbackReason,
        timestamp: DateTime<Utc>,
    },
    RetrievalTimeout {
        request_id: String,
        query: String,
        timeout_ms: u64,
        timestamp: DateTime<Utc>,
    },
    PolicyRefusal {
        request_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl TelemetryEvent {
    /// The request this event belongs to.
    pub fn request_id(&self) -> &str {
        match self {
            TelemetryEvent::RequestCompleted { request_id, .. }
            | TelemetryEvent::FallbackTransition { request_id, .. }
            | TelemetryEvent::RetrievalTimeout { request_id, .. }
            | TelemetryEvent::PolicyRefusal { request_id, .. } => request_id,
        }
    }
}
