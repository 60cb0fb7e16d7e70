//! Telemetry sinks.
//!
//! `ChannelSink` is the production sink: `append` pushes onto an
//! unbounded channel and a background task drains it into a store, so
//! storage latency never leaks into the request path. `MemorySink`
//! and `NullSink` cover tests and hosts that opt out.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use persona_core::models::TelemetryEvent;
use persona_core::traits::ITelemetrySink;

/// Non-blocking sink backed by an unbounded channel.
///
/// A dropped event is acceptable; a blocked request is not. If the
/// drain task has exited, `append` logs at debug and discards.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<TelemetryEvent>,
}

impl ChannelSink {
    /// Spawn the drain task forwarding events into `store`.
    ///
    /// The returned handle completes once every sender is dropped and
    /// the channel is drained, which lets hosts flush on shutdown.
    pub fn spawn(store: Arc<dyn ITelemetrySink>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<TelemetryEvent>();
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                store.append(event);
            }
        });
        (Self { tx }, handle)
    }
}

impl ITelemetrySink for ChannelSink {
    fn append(&self, event: TelemetryEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!(event = "telemetry_dropped", "sink channel closed");
        }
    }
}

/// In-memory sink recording every event, for tests and small hosts.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.events.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl ITelemetrySink for MemorySink {
    fn append(&self, event: TelemetryEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ITelemetrySink for NullSink {
    fn append(&self, _event: TelemetryEvent) {}
}
