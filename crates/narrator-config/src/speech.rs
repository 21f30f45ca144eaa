use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use url::Url;

/// Upstream speech service configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: SpeechProviderType,
    /// API key; may be empty, which is reported when generation is attempted
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Voice identifier
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Longest input accepted for one generation
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
    /// Request timeout (e.g. "120s", "2m")
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl SpeechConfig {
    /// Configured API key, treating an empty value as absent
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider_type: SpeechProviderType::default(),
            api_key: None,
            base_url: None,
            voice: default_voice(),
            model: default_model(),
            max_input_chars: default_max_input_chars(),
            timeout: default_timeout(),
        }
    }
}

/// Supported speech providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechProviderType {
    /// `ElevenLabs`
    #[default]
    Elevenlabs,
}

fn default_voice() -> String {
    "21m00Tcm4TlvDq8N2ACE".to_string()
}

fn default_model() -> String {
    "eleven_multilingual_v2".to_string()
}

const fn default_max_input_chars() -> usize {
    5000
}

const fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
