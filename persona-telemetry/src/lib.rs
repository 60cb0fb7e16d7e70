//! # persona-telemetry
//!
//! Reliability instrumentation for the pipeline: a non-blocking channel
//! sink decoupling request latency from storage latency, an in-memory
//! request log for latency analysis, and tracing setup for hosts.

pub mod request_log;
pub mod sink;
pub mod tracing_setup;

pub use request_log::{RequestLog, RequestLogEntry};
pub use sink::{ChannelSink, MemorySink, NullSink};
