use std::time::Duration;

use async_trait::async_trait;
use narrator_classify::{ClassifiedError, RawFailure};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    http_client::http_client,
    types::{SpeechRequest, SpeechResponse},
};

use super::TtsProvider;

const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

/// `ElevenLabs` text-to-speech provider
pub struct ElevenLabsProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    name: String,
}

impl ElevenLabsProvider {
    pub fn new(
        name: String,
        api_key: SecretString,
        base_url: Option<Url>,
        timeout: Duration,
    ) -> Result<Self, ClassifiedError> {
        let client = http_client(timeout)?;
        let base_url = base_url.map_or_else(
            || DEFAULT_ELEVENLABS_API_URL.to_string(),
            |url| url.as_str().trim_end_matches('/').to_string(),
        );

        Ok(Self {
            client,
            base_url,
            api_key,
            name,
        })
    }

    fn speech_url(&self, voice: &str) -> String {
        format!("{}/text-to-speech/{voice}", self.base_url)
    }
}

#[derive(serde::Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[async_trait]
impl TtsProvider for ElevenLabsProvider {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, ClassifiedError> {
        let url = self.speech_url(&request.voice);

        tracing::debug!(
            model = %request.model,
            voice = %request.voice,
            input_len = request.input.len(),
            "ElevenLabs TTS request"
        );

        let body = ElevenLabsRequest {
            text: &request.input,
            model_id: &request.model,
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| RawFailure::transport(format!("failed to send request to ElevenLabs: {e}")).classify())?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RawFailure::from_http(status.as_u16(), &error_text).classify());
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio = response
            .bytes()
            .await
            .map_err(|e| RawFailure::transport(format!("failed to read ElevenLabs response body: {e}")).classify())?;

        tracing::debug!(bytes = audio.len(), "ElevenLabs TTS synthesis complete");

        Ok(SpeechResponse {
            audio: audio.to_vec(),
            content_type,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
