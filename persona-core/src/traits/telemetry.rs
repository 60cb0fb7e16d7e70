use crate::models::TelemetryEvent;

/// Append-only telemetry collaborator.
///
/// `append` must never block the request path and must accept concurrent
/// writes from many in-flight requests. Loss of an event is acceptable;
/// failing the user-facing request is not, so the call is infallible.
pub trait ITelemetrySink: Send + Sync {
    fn append(&self, event: TelemetryEvent);
}
