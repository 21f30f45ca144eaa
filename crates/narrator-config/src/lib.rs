#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod playback;
pub mod speech;
pub mod telemetry;

use serde::Deserialize;

pub use playback::*;
pub use speech::*;
pub use telemetry::*;

/// Top-level narrator configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Upstream speech service
    #[serde(default)]
    pub speech: SpeechConfig,
    /// Playback and fallback clip
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
