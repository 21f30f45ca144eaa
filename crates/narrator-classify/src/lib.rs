//! Upstream failure classification
//!
//! Turns whatever an upstream text or speech service returned on failure
//! (status code, vendor JSON, free text, or nothing at all) into a
//! [`ClassifiedError`] drawn from a small fixed taxonomy. Consumers only
//! ever see the classified form; vendor text is kept for logs.
//!
//! [`HttpError`] gives front-ends a stable status, error type and message
//! for reporting a failure; the `narrator` CLI builds its JSON error
//! report from it.

#![allow(clippy::must_use_candidate)]

mod classified;
mod error;
mod failure;
mod rules;

pub use classified::{ClassifiedError, ErrorKind};
pub use error::HttpError;
pub use failure::{RawFailure, UpstreamBody};
pub use rules::{Rule, UPSTREAM_RULES, classify};
