use serde::Serialize;

use crate::{AudioSource, MediaHandle};

/// Where the current clip came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Origin {
    Fallback,
    Generated,
}

/// Clip currently owned by the controller, with its engine handle
#[derive(Debug)]
pub struct PlaybackResource {
    origin: Origin,
    source: AudioSource,
    handle: MediaHandle,
}

impl PlaybackResource {
    pub(crate) const fn new(origin: Origin, source: AudioSource, handle: MediaHandle) -> Self {
        Self { origin, source, handle }
    }

    pub const fn origin(&self) -> Origin {
        self.origin
    }

    pub const fn source(&self) -> &AudioSource {
        &self.source
    }

    pub const fn handle(&self) -> &MediaHandle {
        &self.handle
    }

    pub(crate) fn into_handle(self) -> MediaHandle {
        self.handle
    }
}
