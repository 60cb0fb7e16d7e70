//! Request performance logging: mode, latency, fallback count, outcome.

use std::time::Duration;

use persona_core::models::{Mode, TelemetryEvent};
use serde::{Deserialize, Serialize};

/// A single request log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub request_id: String,
    pub mode: Mode,
    pub success: bool,
    pub provider: Option<String>,
    pub latency: Duration,
    pub fallbacks: u32,
    pub timestamp_epoch_ms: i64,
}

impl RequestLogEntry {
    /// Build an entry from a completion event. Other event kinds do not
    /// describe a finished request and yield `None`.
    pub fn from_event(event: &TelemetryEvent) -> Option<Self> {
        match event {
            TelemetryEvent::RequestCompleted {
                request_id,
                mode,
                success,
                provider,
                latency_ms,
                fallbacks,
                timestamp,
                ..
            } => Some(Self {
                request_id: request_id.clone(),
                mode: *mode,
                success: *success,
                provider: provider.clone(),
                latency: Duration::from_millis(*latency_ms),
                fallbacks: *fallbacks,
                timestamp_epoch_ms: timestamp.timestamp_millis(),
            }),
            _ => None,
        }
    }
}

/// Append-only request log for latency and reliability analysis.
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    entries: Vec<RequestLogEntry>,
    /// Maximum entries to retain (ring buffer behavior).
    max_entries: usize,
}

impl RequestLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 50_000,
        }
    }

    /// Create with a custom capacity.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Record a completed request.
    pub fn record(&mut self, entry: RequestLogEntry) {
        tracing::debug!(
            event = "request_logged",
            request_id = %entry.request_id,
            mode = ?entry.mode,
            success = entry.success,
            latency_ms = entry.latency.as_millis() as u64,
            fallbacks = entry.fallbacks,
            "request logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    /// Get all entries.
    pub fn entries(&self) -> &[RequestLogEntry] {
        &self.entries
    }

    /// Average latency across all logged requests.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    /// Fraction of logged requests that succeeded.
    pub fn success_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let successes = self.entries.iter().filter(|e| e.success).count();
        successes as f64 / self.entries.len() as f64
    }

    /// Total number of logged requests.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(id: &str, latency_ms: u64, success: bool) -> RequestLogEntry {
        RequestLogEntry {
            request_id: id.to_string(),
            mode: Mode::Basic,
            success,
            provider: None,
            latency: Duration::from_millis(latency_ms),
            fallbacks: 0,
            timestamp_epoch_ms: Utc::now().timestamp_millis(),
        }
    }

    #[test]
    fn avg_latency_of_empty_log_is_zero() {
        assert_eq!(RequestLog::new().avg_latency(), Duration::ZERO);
    }

    #[test]
    fn avg_and_percentile_latency() {
        let mut log = RequestLog::new();
        for (i, ms) in [100u64, 200, 300, 400, 500].iter().enumerate() {
            log.record(entry(&format!("r{i}"), *ms, true));
        }
        assert_eq!(log.avg_latency(), Duration::from_millis(300));
        assert_eq!(log.latency_percentile(0.5), Duration::from_millis(300));
        assert_eq!(log.latency_percentile(1.0), Duration::from_millis(500));
    }

    #[test]
    fn capacity_drops_oldest_entries() {
        let mut log = RequestLog::with_capacity(3);
        for i in 0..5 {
            log.record(entry(&format!("r{i}"), 100, true));
        }
        assert_eq!(log.count(), 3);
        assert_eq!(log.entries()[0].request_id, "r2");
    }

    #[test]
    fn success_rate_counts_failures() {
        let mut log = RequestLog::new();
        log.record(entry("a", 100, true));
        log.record(entry("b", 100, false));
        log.record(entry("c", 100, true));
        log.record(entry("d", 100, true));
        assert!((log.success_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn from_event_ignores_non_completion_events() {
        let refusal = TelemetryEvent::PolicyRefusal {
            request_id: "r".to_string(),
            timestamp: Utc::now(),
        };
        assert!(RequestLogEntry::from_event(&refusal).is_none());

        let completed = TelemetryEvent::RequestCompleted {
            request_id: "r".to_string(),
            mode: Mode::Advanced,
            success: true,
            provider: Some("openai".to_string()),
            model: Some("gpt-4o".to_string()),
            latency_ms: 250,
            fallbacks: 1,
            timestamp: Utc::now(),
        };
        let entry = RequestLogEntry::from_event(&completed).unwrap();
        assert_eq!(entry.mode, Mode::Advanced);
        assert_eq!(entry.latency, Duration::from_millis(250));
        assert_eq!(entry.fallbacks, 1);
    }
}
