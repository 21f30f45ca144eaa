use narrator_classify::{ClassifiedError, ErrorKind};
use serde::Serialize;

use crate::Origin;

/// Generic message shown when the media engine fails mid-playback
const PLAYBACK_FAILED_MESSAGE: &str = "Playback failed. Press play to try again.";

/// Playback status owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlaybackStatus {
    /// No resource loaded yet
    Idle,
    /// Resource loaded, positioned at the start
    Ready,
    Playing,
    Paused,
    /// Reached the end of the media
    Ended,
}

/// Display label for a status and origin
///
/// Total over every combination; the origin only matters while `Ready`.
pub const fn status_label(status: PlaybackStatus, origin: Option<Origin>) -> &'static str {
    match (status, origin) {
        (PlaybackStatus::Idle, _) => "no audio yet",
        (PlaybackStatus::Ready, Some(Origin::Generated)) => "ready to play",
        (PlaybackStatus::Ready, _) => "preview: default clip",
        (PlaybackStatus::Playing, _) => "playing…",
        (PlaybackStatus::Paused, _) => "paused",
        (PlaybackStatus::Ended, _) => "finished",
    }
}

/// User-facing notice attached to the current playback state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// Latest generation attempt failed; carries the fixed classified message
    GenerationFailed { kind: ErrorKind, message: &'static str },
    /// Media engine failed while playing
    PlaybackFailed { message: &'static str },
}

impl Notice {
    pub fn generation_failed(error: &ClassifiedError) -> Self {
        Self::GenerationFailed {
            kind: error.kind(),
            message: error.user_message(),
        }
    }

    pub const fn playback_failed() -> Self {
        Self::PlaybackFailed {
            message: PLAYBACK_FAILED_MESSAGE,
        }
    }

    pub const fn message(&self) -> &'static str {
        match *self {
            Self::GenerationFailed { message, .. } | Self::PlaybackFailed { message } => message,
        }
    }
}

/// Consistent view of the controller for a UI collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,
    pub origin: Option<Origin>,
    pub label: &'static str,
    pub progress_fraction: f64,
    pub notice: Option<Notice>,
}
