//! Narration session
//!
//! Glue between the caller, the upstream speech service and the playback
//! controller: pre-flight checks, at most one outstanding generation per
//! text, and discarding results that were superseded by a newer request.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod generation;
mod session;

pub use generation::{Admission, Completion, GenerationOutcome, GenerationRequest, GenerationTicket};
pub use session::{NarrationSession, SpeechSettings};
