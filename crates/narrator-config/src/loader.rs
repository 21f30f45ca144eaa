use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Config::parse`] fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), "configuration loaded");

        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// Expands `{{ env.VAR }}` placeholders, deserializes, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if variable expansion, TOML parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// A missing API key is deliberately accepted here; it is reported when
    /// generation is attempted.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_speech()?;
        self.validate_playback()?;
        Ok(())
    }

    fn validate_speech(&self) -> anyhow::Result<()> {
        let speech = &self.speech;

        if let Some(ref url) = speech.base_url
            && !matches!(url.scheme(), "http" | "https")
        {
            anyhow::bail!("speech.base_url must use http or https, got '{}'", url.scheme());
        }

        if speech.voice.trim().is_empty() {
            anyhow::bail!("speech.voice must not be empty");
        }

        if speech.model.trim().is_empty() {
            anyhow::bail!("speech.model must not be empty");
        }

        if speech.max_input_chars == 0 {
            anyhow::bail!("speech.max_input_chars must be greater than 0");
        }

        if speech.timeout.is_zero() {
            anyhow::bail!("speech.timeout must be greater than 0");
        }

        Ok(())
    }

    fn validate_playback(&self) -> anyhow::Result<()> {
        if self.playback.fallback_clip.as_os_str().is_empty() {
            anyhow::bail!("playback.fallback_clip must not be empty");
        }

        Ok(())
    }
}
