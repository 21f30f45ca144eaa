use narrator_classify::ClassifiedError;

use crate::{
    AudioSource, MediaEngine, Notice, Origin, PlaybackError, PlaybackResource, PlaybackSnapshot, PlaybackStatus,
    status_label,
};

/// Owns at most one playable resource and the status shown for it
///
/// Mutated only through discrete events delivered one at a time: user
/// commands, media clock callbacks and generation results. The status is
/// `Idle` exactly when no resource is loaded.
pub struct PlaybackController<E: MediaEngine> {
    engine: E,
    fallback: AudioSource,
    resource: Option<PlaybackResource>,
    status: PlaybackStatus,
    progress: f64,
    notice: Option<Notice>,
}

impl<E: MediaEngine> PlaybackController<E> {
    /// Create an idle controller that will fall back to `fallback`
    pub const fn new(engine: E, fallback: AudioSource) -> Self {
        Self {
            engine,
            fallback,
            resource: None,
            status: PlaybackStatus::Idle,
            progress: 0.0,
            notice: None,
        }
    }

    pub const fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn origin(&self) -> Option<Origin> {
        self.resource.as_ref().map(PlaybackResource::origin)
    }

    pub const fn resource(&self) -> Option<&PlaybackResource> {
        self.resource.as_ref()
    }

    pub const fn progress_fraction(&self) -> f64 {
        self.progress
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Display label for the current state
    pub fn label(&self) -> &'static str {
        status_label(self.status, self.origin())
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: self.status,
            origin: self.origin(),
            label: self.label(),
            progress_fraction: self.progress,
            notice: self.notice.clone(),
        }
    }

    /// Load the fallback clip if nothing is loaded yet
    ///
    /// Called once content to narrate exists. Does nothing when a resource
    /// is already present, whatever its origin.
    pub fn initialize(&mut self) -> Result<(), PlaybackError> {
        if self.resource.is_some() {
            tracing::debug!("playback already initialized");
            return Ok(());
        }

        let handle = self.engine.load(&self.fallback)?;
        tracing::debug!(source = %self.fallback.describe(), "fallback clip loaded");

        self.resource = Some(PlaybackResource::new(Origin::Fallback, self.fallback.clone(), handle));
        self.progress = 0.0;
        self.set_status(PlaybackStatus::Ready);

        Ok(())
    }

    /// Swap in freshly generated audio
    ///
    /// Valid from every non-idle state. The new source is loaded first; only
    /// then is the superseded clip halted and its handle released once, and
    /// the controller lands in `Ready` with progress reset. If the engine
    /// cannot load the new source, the current resource keeps playing
    /// untouched and a notice is raised.
    pub fn replace_with_generated(&mut self, source: AudioSource) -> Result<(), PlaybackError> {
        if self.resource.is_none() {
            return Err(PlaybackError::NotInitialized);
        }

        let handle = match self.engine.load(&source) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, source = %source.describe(), "generated audio could not be loaded");
                self.notice = Some(Notice::playback_failed());
                return Err(e);
            }
        };

        tracing::debug!(source = %source.describe(), "generated audio loaded");

        let previous = self
            .resource
            .replace(PlaybackResource::new(Origin::Generated, source, handle));
        if let Some(previous) = previous {
            if matches!(self.status, PlaybackStatus::Playing | PlaybackStatus::Paused) {
                self.engine.halt(previous.handle());
            }
            self.engine.release(previous.into_handle());
        }

        self.progress = 0.0;
        self.notice = None;
        self.set_status(PlaybackStatus::Ready);

        Ok(())
    }

    /// Record a failed generation attempt
    ///
    /// The current resource is kept as is, so a generated clip never
    /// regresses to the fallback.
    pub fn on_generation_failed(&mut self, error: &ClassifiedError) {
        tracing::info!(
            kind = %error.kind(),
            origin = ?self.origin(),
            "generation failed, keeping current audio"
        );
        self.notice = Some(Notice::generation_failed(error));
    }

    /// Play when stopped, paused or finished; pause when playing
    pub fn toggle_play_pause(&mut self) -> Result<(), PlaybackError> {
        match self.status {
            PlaybackStatus::Idle => Self::ignored("toggle"),
            PlaybackStatus::Playing => self.pause(),
            PlaybackStatus::Ready | PlaybackStatus::Paused | PlaybackStatus::Ended => self.play(),
        }
    }

    pub fn play(&mut self) -> Result<(), PlaybackError> {
        let Some(current) = &self.resource else {
            return Self::ignored("play");
        };

        let from_start = match self.status {
            PlaybackStatus::Playing => return Ok(()),
            PlaybackStatus::Paused => false,
            PlaybackStatus::Idle | PlaybackStatus::Ready | PlaybackStatus::Ended => true,
        };

        if let Err(e) = self.engine.play(current.handle(), from_start) {
            self.on_playback_error(&e.to_string());
            return Err(e);
        }

        if from_start {
            self.progress = 0.0;
        }
        self.notice = None;
        self.set_status(PlaybackStatus::Playing);

        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        let Some(current) = &self.resource else {
            return Self::ignored("pause");
        };

        if self.status == PlaybackStatus::Playing {
            self.engine.pause(current.handle());
            self.set_status(PlaybackStatus::Paused);
        }

        Ok(())
    }

    /// Stop and rewind; progress is reset unconditionally
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        let Some(current) = &self.resource else {
            return Self::ignored("stop");
        };

        self.engine.halt(current.handle());
        self.progress = 0.0;
        self.set_status(PlaybackStatus::Ready);

        Ok(())
    }

    /// Media clock position update, in seconds
    ///
    /// Ignored unless playing, or when the duration is zero or unknown.
    pub fn on_progress(&mut self, current_time: f64, duration: f64) {
        if self.status != PlaybackStatus::Playing {
            return;
        }
        if !(duration.is_finite() && duration > 0.0) || !current_time.is_finite() {
            return;
        }

        self.progress = (current_time / duration).clamp(0.0, 1.0);
    }

    /// Media clock reached the end of the clip
    pub fn on_ended(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.progress = 1.0;
            self.set_status(PlaybackStatus::Ended);
        }
    }

    /// Media engine failed to decode or fetch while playing
    ///
    /// Returns to `Ready` on the same resource with a generic notice.
    pub fn on_playback_error(&mut self, detail: &str) {
        let Some(current) = &self.resource else {
            tracing::debug!(detail, "playback error with no resource loaded");
            return;
        };

        tracing::warn!(detail, origin = %current.origin(), "playback failed");

        self.engine.halt(current.handle());
        self.progress = 0.0;
        self.notice = Some(Notice::playback_failed());
        self.set_status(PlaybackStatus::Ready);
    }

    fn ignored(command: &str) -> Result<(), PlaybackError> {
        tracing::debug!(command, "ignored, no audio loaded");
        Err(PlaybackError::NoResource)
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.status != status {
            tracing::debug!(from = %self.status, to = %status, origin = ?self.origin(), "playback status changed");
            self.status = status;
        }
    }
}

impl<E: MediaEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            if matches!(self.status, PlaybackStatus::Playing | PlaybackStatus::Paused) {
                self.engine.halt(resource.handle());
            }
            self.engine.release(resource.into_handle());
        }
    }
}
