//! In-memory media engine that records every call

use std::sync::{Arc, Mutex};

use crate::{AudioSource, MediaEngine, MediaHandle, PlaybackError};

/// Call received by a [`RecordingEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Load { id: u64, source: AudioSource },
    Play { id: u64, from_start: bool },
    Pause { id: u64 },
    Halt { id: u64 },
    Release { id: u64 },
}

#[derive(Default)]
struct EngineLog {
    next_id: u64,
    calls: Vec<EngineCall>,
    fail_next_load: bool,
    fail_next_play: bool,
}

/// Engine double whose log survives the controller that owns it
///
/// Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingEngine {
    log: Arc<Mutex<EngineLog>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `load` fail
    pub fn fail_next_load(&self) {
        self.lock().fail_next_load = true;
    }

    /// Make the next `play` fail
    pub fn fail_next_play(&self) {
        self.lock().fail_next_play = true;
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.lock().calls.clone()
    }

    /// How many times the handle with `id` was released
    pub fn release_count(&self, id: u64) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, EngineCall::Release { id: released } if *released == id))
            .count()
    }

    /// Handles loaded and not yet released
    pub fn live_handles(&self) -> Vec<u64> {
        let log = self.lock();
        log.calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Load { id, .. } => Some(*id),
                _ => None,
            })
            .filter(|id| {
                !log.calls
                    .iter()
                    .any(|call| matches!(call, EngineCall::Release { id: released } if released == id))
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EngineLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MediaEngine for RecordingEngine {
    fn load(&mut self, source: &AudioSource) -> Result<MediaHandle, PlaybackError> {
        let mut log = self.lock();

        if std::mem::take(&mut log.fail_next_load) {
            return Err(PlaybackError::Engine(format!("cannot decode {}", source.describe())));
        }

        log.next_id += 1;
        let id = log.next_id;
        log.calls.push(EngineCall::Load {
            id,
            source: source.clone(),
        });

        Ok(MediaHandle::new(id))
    }

    fn play(&mut self, handle: &MediaHandle, from_start: bool) -> Result<(), PlaybackError> {
        let mut log = self.lock();

        if std::mem::take(&mut log.fail_next_play) {
            return Err(PlaybackError::Engine("output device unavailable".to_owned()));
        }

        log.calls.push(EngineCall::Play {
            id: handle.id(),
            from_start,
        });
        Ok(())
    }

    fn pause(&mut self, handle: &MediaHandle) {
        self.lock().calls.push(EngineCall::Pause { id: handle.id() });
    }

    fn halt(&mut self, handle: &MediaHandle) {
        self.lock().calls.push(EngineCall::Halt { id: handle.id() });
    }

    fn release(&mut self, handle: MediaHandle) {
        self.lock().calls.push(EngineCall::Release { id: handle.id() });
    }
}
