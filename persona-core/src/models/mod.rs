mod attempt;
mod candidate;
mod query;
mod rag_result;
mod telemetry_event;

pub use attempt::{AttemptOutcome, GenerationAttempt};
pub use candidate::{Candidate, FusedCandidate, RankedContext};
pub use query::{Mode, QuestionClass, SearchQuery, Technique};
pub use rag_result::{RagMetadata, RagResult};
pub use telemetry_event::{FallbackReason, TelemetryEvent};
