//! Concrete `IGenerationProvider` adapters.
//!
//! The pipeline treats providers as collaborators; this module carries
//! the one adapter most deployments need, behind the `http` feature.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{HttpProvider, HttpProviderConfig};
