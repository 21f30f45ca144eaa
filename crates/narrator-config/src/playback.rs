use std::path::PathBuf;

use serde::Deserialize;

/// Playback configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Clip played until narration has been generated
    #[serde(default = "default_fallback_clip")]
    pub fallback_clip: PathBuf,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fallback_clip: default_fallback_clip(),
        }
    }
}

fn default_fallback_clip() -> PathBuf {
    PathBuf::from("assets/fallback.mp3")
}
