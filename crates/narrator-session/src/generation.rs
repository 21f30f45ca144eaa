use std::fmt;
use std::sync::Arc;

use narrator_classify::ClassifiedError;
use narrator_playback::PlaybackError;
use tts::{SpeechRequest, SpeechResponse, TtsProvider};

/// Identifies one generation request within a session
///
/// Tickets increase monotonically; only the latest one may change the
/// loaded audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationTicket(pub(crate) u64);

impl fmt::Display for GenerationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of asking the session to start a generation
pub enum Admission {
    /// New request issued; run it and hand the outcome back
    Started(GenerationRequest),
    /// A request for the same text is still outstanding
    AlreadyInFlight(GenerationTicket),
}

/// Upstream call detached from the session so it can run while the session
/// keeps handling playback events
pub struct GenerationRequest {
    pub(crate) ticket: GenerationTicket,
    pub(crate) provider: Arc<dyn TtsProvider>,
    pub(crate) request: SpeechRequest,
}

impl GenerationRequest {
    pub const fn ticket(&self) -> GenerationTicket {
        self.ticket
    }

    pub const fn request(&self) -> &SpeechRequest {
        &self.request
    }

    /// Call the upstream speech service
    pub async fn run(self) -> GenerationOutcome {
        tracing::debug!(ticket = %self.ticket, provider = self.provider.name(), "generation started");
        let result = self.provider.synthesize(self.request).await;

        GenerationOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

/// What came back from the upstream service for one ticket
#[derive(Debug)]
pub struct GenerationOutcome {
    pub ticket: GenerationTicket,
    pub result: Result<SpeechResponse, ClassifiedError>,
}

/// How the session handled a generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Generated audio is now loaded
    Applied,
    /// Generation failed; the current audio stays loaded
    Failed(ClassifiedError),
    /// Generated audio could not be loaded by the media engine
    Unplayable(PlaybackError),
    /// Result belonged to a superseded request and was dropped
    Stale,
    /// Same text was already being generated; nothing new was sent
    AlreadyInFlight,
}
