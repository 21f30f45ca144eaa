use std::sync::Arc;

use narrator_classify::ClassifiedError;
use narrator_config::{PlaybackConfig, SpeechConfig};
use narrator_playback::{AudioSource, MediaEngine, PlaybackController, PlaybackSnapshot};
use tts::{SpeechRequest, TtsProvider};

use crate::generation::{Admission, Completion, GenerationOutcome, GenerationRequest, GenerationTicket};

/// Per-request speech settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSettings {
    pub voice: String,
    pub model: String,
    pub max_input_chars: usize,
}

impl From<&SpeechConfig> for SpeechSettings {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            voice: config.voice.clone(),
            model: config.model.clone(),
            max_input_chars: config.max_input_chars,
        }
    }
}

struct Pending {
    ticket: GenerationTicket,
    text: String,
}

/// Single-user narration session
///
/// Events are handled one at a time through `&mut self`. Generation
/// requests are detached ([`GenerationRequest::run`]) so the caller decides
/// when to await them; their outcomes come back through
/// [`NarrationSession::complete`].
pub struct NarrationSession<E: MediaEngine> {
    controller: PlaybackController<E>,
    speech: Result<Arc<dyn TtsProvider>, ClassifiedError>,
    settings: SpeechSettings,
    last_ticket: u64,
    pending: Option<Pending>,
}

impl<E: MediaEngine> NarrationSession<E> {
    /// Session with an explicit provider, or the error that prevents one
    pub const fn new(
        engine: E,
        fallback: AudioSource,
        speech: Result<Arc<dyn TtsProvider>, ClassifiedError>,
        settings: SpeechSettings,
    ) -> Self {
        Self {
            controller: PlaybackController::new(engine, fallback),
            speech,
            settings,
            last_ticket: 0,
            pending: None,
        }
    }

    /// Session wired from configuration
    ///
    /// A missing API key does not prevent the session from starting; every
    /// generation attempt is then reported as a `Configuration` error.
    pub fn from_config(engine: E, speech: &SpeechConfig, playback: &PlaybackConfig) -> Self {
        Self::new(
            engine,
            AudioSource::File(playback.fallback_clip.clone()),
            tts::build_provider(speech),
            SpeechSettings::from(speech),
        )
    }

    pub const fn controller(&self) -> &PlaybackController<E> {
        &self.controller
    }

    /// Controller access for user commands and media clock callbacks
    pub fn controller_mut(&mut self) -> &mut PlaybackController<E> {
        &mut self.controller
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    /// Whether a generation is outstanding
    pub const fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// Content to narrate now exists; make the fallback clip available
    pub fn story_ready(&mut self) {
        self.ensure_initialized();
    }

    /// Check the input and issue a generation request
    ///
    /// Pre-flight failures (empty or oversized text, missing credentials)
    /// are reported to the controller and returned without contacting the
    /// upstream service. A request for text that is already being
    /// generated is not sent again. A request for different text, including
    /// one rejected by pre-flight, supersedes the outstanding one, whose
    /// result will be discarded.
    pub fn begin_generation(&mut self, text: &str) -> Result<Admission, ClassifiedError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(self.reject(text, ClassifiedError::validation("no text to narrate")));
        }

        let chars = text.chars().count();
        if chars > self.settings.max_input_chars {
            return Err(self.reject(
                text,
                ClassifiedError::validation(format!(
                    "input has {chars} characters, limit is {}",
                    self.settings.max_input_chars
                )),
            ));
        }

        let provider = match self.speech.as_ref().map(Arc::clone).map_err(Clone::clone) {
            Ok(provider) => provider,
            Err(error) => return Err(self.reject(text, error)),
        };

        if let Some(pending) = &self.pending
            && pending.text == text
        {
            tracing::debug!(ticket = %pending.ticket, "generation for this text already in flight");
            return Ok(Admission::AlreadyInFlight(pending.ticket));
        }

        self.last_ticket += 1;
        let ticket = GenerationTicket(self.last_ticket);

        if let Some(superseded) = self.pending.replace(Pending {
            ticket,
            text: text.to_owned(),
        }) {
            tracing::debug!(superseded = %superseded.ticket, ticket = %ticket, "generation superseded");
        }

        Ok(Admission::Started(GenerationRequest {
            ticket,
            provider,
            request: SpeechRequest {
                input: text.to_owned(),
                voice: self.settings.voice.clone(),
                model: self.settings.model.clone(),
            },
        }))
    }

    /// Apply the outcome of a generation request
    ///
    /// Outcomes for anything but the latest outstanding ticket are dropped
    /// without touching playback.
    pub fn complete(&mut self, outcome: GenerationOutcome) -> Completion {
        let is_latest = self.pending.as_ref().is_some_and(|p| p.ticket == outcome.ticket);
        if !is_latest {
            tracing::debug!(ticket = %outcome.ticket, "discarding stale generation result");
            return Completion::Stale;
        }
        self.pending = None;

        self.ensure_initialized();

        match outcome.result {
            Ok(response) => {
                let source = AudioSource::Memory {
                    bytes: response.audio,
                    content_type: response.content_type,
                };

                match self.controller.replace_with_generated(source) {
                    Ok(()) => {
                        tracing::info!(ticket = %outcome.ticket, "generated narration loaded");
                        Completion::Applied
                    }
                    Err(e) => Completion::Unplayable(e),
                }
            }
            Err(error) => {
                self.controller.on_generation_failed(&error);
                Completion::Failed(error)
            }
        }
    }

    /// Generate narration for `text` and apply the result
    pub async fn narrate(&mut self, text: &str) -> Completion {
        match self.begin_generation(text) {
            Ok(Admission::Started(request)) => {
                let outcome = request.run().await;
                self.complete(outcome)
            }
            Ok(Admission::AlreadyInFlight(_)) => Completion::AlreadyInFlight,
            Err(error) => Completion::Failed(error),
        }
    }

    /// Report a pre-flight failure
    ///
    /// The rejected text is still the latest request, so an outstanding
    /// generation for other text is superseded and its result discarded.
    fn reject(&mut self, text: &str, error: ClassifiedError) -> ClassifiedError {
        tracing::warn!(kind = %error.kind(), detail = error.raw_detail(), "generation rejected before sending");
        if let Some(superseded) = self.pending.take_if(|pending| pending.text != text) {
            tracing::debug!(superseded = %superseded.ticket, "generation superseded by rejected request");
        }
        self.ensure_initialized();
        self.controller.on_generation_failed(&error);
        error
    }

    fn ensure_initialized(&mut self) {
        if let Err(e) = self.controller.initialize() {
            tracing::warn!(error = %e, "fallback clip could not be loaded");
        }
    }
}
