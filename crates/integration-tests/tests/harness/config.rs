//! Configuration helpers for integration tests

use narrator_config::Config;

/// Config pointing the speech provider at a mock upstream
pub fn config_for(base_url: &str, api_key: &str) -> Config {
    let raw = format!(
        r#"
        [speech]
        type = "elevenlabs"
        api_key = "{api_key}"
        base_url = "{base_url}"
        voice = "test-voice"
        model = "eleven_multilingual_v2"
        max_input_chars = 200
        timeout = "5s"

        [playback]
        fallback_clip = "assets/fallback.mp3"
        "#
    );

    Config::parse(&raw).expect("valid test config")
}
