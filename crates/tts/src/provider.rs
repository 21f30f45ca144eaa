pub mod elevenlabs;

use async_trait::async_trait;
use narrator_classify::ClassifiedError;

use crate::types::{SpeechRequest, SpeechResponse};

/// Upstream speech service
///
/// Failures are classified where they are first observed, so callers only
/// ever receive a [`ClassifiedError`].
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Synthesize text to speech
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, ClassifiedError>;

    /// Get the provider name
    fn name(&self) -> &str;
}
