use std::collections::HashMap;

use narrator_playback::{AudioSource, MediaEngine, MediaHandle, PlaybackError};

/// Media engine without an output device
///
/// Checks that sources are readable and tracks handles, which is all the
/// CLI needs to decide which clip to export.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    next_id: u64,
    loaded: HashMap<u64, String>,
}

#[cfg(test)]
impl HeadlessEngine {
    /// Number of handles not yet released
    pub fn loaded(&self) -> usize {
        self.loaded.len()
    }
}

impl MediaEngine for HeadlessEngine {
    fn load(&mut self, source: &AudioSource) -> Result<MediaHandle, PlaybackError> {
        match source {
            AudioSource::File(path) => {
                let metadata = std::fs::metadata(path)
                    .map_err(|e| PlaybackError::Engine(format!("cannot open {}: {e}", path.display())))?;
                if metadata.len() == 0 {
                    return Err(PlaybackError::Engine(format!("{} is empty", path.display())));
                }
            }
            AudioSource::Memory { bytes, .. } if bytes.is_empty() => {
                return Err(PlaybackError::Engine("generated audio is empty".to_owned()));
            }
            AudioSource::Memory { .. } => {}
        }

        self.next_id += 1;
        self.loaded.insert(self.next_id, source.describe());
        tracing::debug!(handle = self.next_id, source = %source.describe(), "source loaded");

        Ok(MediaHandle::new(self.next_id))
    }

    fn play(&mut self, handle: &MediaHandle, from_start: bool) -> Result<(), PlaybackError> {
        tracing::debug!(handle = handle.id(), from_start, "play");
        Ok(())
    }

    fn pause(&mut self, handle: &MediaHandle) {
        tracing::debug!(handle = handle.id(), "pause");
    }

    fn halt(&mut self, handle: &MediaHandle) {
        tracing::debug!(handle = handle.id(), "halt");
    }

    fn release(&mut self, handle: MediaHandle) {
        if self.loaded.remove(&handle.id()).is_none() {
            tracing::warn!(handle = handle.id(), "release of unknown handle");
        }
    }
}
