/// Text to synthesize and the voice to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// Text to synthesize into speech
    pub input: String,
    /// Voice identifier
    pub voice: String,
    /// Model identifier (e.g. "`eleven_multilingual_v2`")
    pub model: String,
}

/// Raw audio returned by a speech provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResponse {
    /// Encoded audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/mpeg")
    pub content_type: String,
}
