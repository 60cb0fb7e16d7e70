//! Span definitions per pipeline stage, plus subscriber initialization
//! for binary hosts.
//!
//! Each span carries the request id and stage metadata via the
//! `tracing` crate.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber from `RUST_LOG`, defaulting to
/// `info`. Safe to call more than once; later calls are no-ops.
pub fn init(json_output: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if json_output {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::debug!("subscriber already installed");
    }
}

/// Create a pipeline request span.
#[macro_export]
macro_rules! request_span {
    ($request_id:expr, $mode:expr) => {
        tracing::info_span!("persona.request", request_id = %$request_id, mode = ?$mode)
    };
}

/// Create a query transformation span.
#[macro_export]
macro_rules! transform_span {
    ($request_id:expr) => {
        tracing::info_span!("persona.transform", request_id = %$request_id)
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($request_id:expr, $query_count:expr) => {
        tracing::info_span!("persona.retrieval", request_id = %$request_id, query_count = $query_count)
    };
}

/// Create a generation span.
#[macro_export]
macro_rules! generation_span {
    ($request_id:expr, $provider:expr) => {
        tracing::info_span!("persona.generation", request_id = %$request_id, provider = %$provider)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REQUEST: &str = "persona.request";
    pub const TRANSFORM: &str = "persona.transform";
    pub const RETRIEVAL: &str = "persona.retrieval";
    pub const GENERATION: &str = "persona.generation";
}
