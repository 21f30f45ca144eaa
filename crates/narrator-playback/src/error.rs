use thiserror::Error;

/// Errors reported by playback commands
///
/// None of these are fatal to a session: the controller keeps whatever
/// resource it already owns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Command needs a loaded resource but the controller is idle
    #[error("no audio resource is loaded")]
    NoResource,

    /// Generated audio arrived before the fallback clip was loaded
    #[error("playback controller has not been initialized")]
    NotInitialized,

    /// The media engine could not load or play a source
    #[error("media engine error: {0}")]
    Engine(String),
}
