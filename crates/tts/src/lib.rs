#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod http_client;
mod provider;
mod types;

use std::sync::Arc;

use narrator_classify::ClassifiedError;
use narrator_config::{SpeechConfig, SpeechProviderType};

pub use provider::{TtsProvider, elevenlabs::ElevenLabsProvider};
pub use types::{SpeechRequest, SpeechResponse};

/// Build the configured speech provider
///
/// Fails with a `Configuration` classification when no API key is set, so
/// callers can report it without contacting the upstream service.
pub fn build_provider(config: &SpeechConfig) -> Result<Arc<dyn TtsProvider>, ClassifiedError> {
    let Some(api_key) = config.api_key() else {
        return Err(ClassifiedError::configuration("speech.api_key is not set"));
    };

    let provider: Arc<dyn TtsProvider> = match config.provider_type {
        SpeechProviderType::Elevenlabs => Arc::new(ElevenLabsProvider::new(
            "elevenlabs".to_owned(),
            api_key.clone(),
            config.base_url.clone(),
            config.timeout,
        )?),
    };

    tracing::debug!(provider = provider.name(), "speech provider initialized");

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use narrator_classify::ErrorKind;
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        let config = SpeechConfig::default();
        let err = build_provider(&config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn blank_key_is_a_configuration_error() {
        let config = SpeechConfig {
            api_key: Some(SecretString::from("   ".to_owned())),
            ..SpeechConfig::default()
        };
        let err = build_provider(&config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn builds_elevenlabs_provider() {
        let config = SpeechConfig {
            api_key: Some(SecretString::from("sk-test".to_owned())),
            ..SpeechConfig::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "elevenlabs");
    }
}
