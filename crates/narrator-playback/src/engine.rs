use std::path::PathBuf;

use crate::PlaybackError;

/// Decodable audio data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Clip stored on disk (the fallback clip, usually)
    File(PathBuf),
    /// Clip held in memory (generated narration)
    Memory {
        /// Encoded audio bytes
        bytes: Vec<u8>,
        /// Content type of the audio (e.g. "audio/mpeg")
        content_type: String,
    },
}

impl AudioSource {
    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => format!("file {}", path.display()),
            Self::Memory { bytes, content_type } => format!("{content_type} ({} bytes)", bytes.len()),
        }
    }
}

/// Transient engine-side handle bound to a loaded source
///
/// Not `Clone`: the only way to give a handle back is to move it into
/// [`MediaEngine::release`], so each handle is released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct MediaHandle(u64);

impl MediaHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// Media clock capability the controller drives
///
/// Any runtime that can decode a source, play and pause it, and report
/// position through the controller's `on_progress` / `on_ended` /
/// `on_playback_error` callbacks satisfies this.
pub trait MediaEngine {
    /// Bind a source to a new transient handle
    fn load(&mut self, source: &AudioSource) -> Result<MediaHandle, PlaybackError>;

    /// Start or resume playback, rewinding first when `from_start` is set
    fn play(&mut self, handle: &MediaHandle, from_start: bool) -> Result<(), PlaybackError>;

    /// Pause playback, keeping the position
    fn pause(&mut self, handle: &MediaHandle);

    /// Stop playback and rewind to the start
    fn halt(&mut self, handle: &MediaHandle);

    /// Free everything bound to the handle
    fn release(&mut self, handle: MediaHandle);
}
