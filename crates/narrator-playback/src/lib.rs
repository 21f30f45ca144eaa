//! Playback and media resource lifecycle
//!
//! [`PlaybackController`] keeps exactly one playable clip loaded once content
//! exists: a fallback clip until narration is generated, then the most
//! recent generated clip. It drives an abstract [`MediaEngine`] and exposes
//! a [`PlaybackSnapshot`] for display.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod controller;
mod engine;
mod error;
mod resource;
mod status;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use controller::PlaybackController;
pub use engine::{AudioSource, MediaEngine, MediaHandle};
pub use error::PlaybackError;
pub use resource::{Origin, PlaybackResource};
pub use status::{Notice, PlaybackSnapshot, PlaybackStatus, status_label};
