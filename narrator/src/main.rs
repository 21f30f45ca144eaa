#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod engine;

use std::path::Path;

use args::{Args, Command};
use clap::Parser;
use engine::HeadlessEngine;
use narrator_classify::HttpError;
use narrator_config::Config;
use narrator_playback::{AudioSource, MediaEngine};
use narrator_session::{Completion, NarrationSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    narrator_telemetry::init(&config.telemetry)?;

    tracing::info!(config_path = %args.config.display(), "starting narrator");

    match args.command {
        Command::Speak { text, output } => speak(&config, &text, &output).await,
        Command::Check => check(&config),
    }
}

async fn speak(config: &Config, text: &str, output: &Path) -> anyhow::Result<()> {
    let mut session = NarrationSession::from_config(HeadlessEngine::default(), &config.speech, &config.playback);
    session.story_ready();

    let failure = match session.narrate(text).await {
        Completion::Applied => {
            tracing::info!("narration generated");
            None
        }
        Completion::Failed(error) => {
            eprintln!("{error}");
            Some(error_report(&error))
        }
        Completion::Unplayable(e) => {
            eprintln!("generated audio could not be played: {e}");
            None
        }
        Completion::Stale | Completion::AlreadyInFlight => None,
    };

    let Some(resource) = session.controller().resource() else {
        anyhow::bail!(
            "no audio available: the fallback clip {} could not be loaded",
            config.playback.fallback_clip.display()
        );
    };

    export(resource.source(), output)?;
    tracing::info!(output = %output.display(), origin = %resource.origin(), "audio exported");

    let report = serde_json::json!({
        "playback": session.snapshot(),
        "error": failure,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// JSON description of a generation failure, safe to show to users
fn error_report(error: &impl HttpError) -> serde_json::Value {
    serde_json::json!({
        "message": error.client_message(),
        "type": error.error_type(),
        "status": error.status_code().as_u16(),
    })
}

fn export(source: &AudioSource, output: &Path) -> anyhow::Result<()> {
    match source {
        AudioSource::File(path) => {
            std::fs::copy(path, output)
                .map_err(|e| anyhow::anyhow!("failed to copy {} to {}: {e}", path.display(), output.display()))?;
        }
        AudioSource::Memory { bytes, .. } => {
            std::fs::write(output, bytes).map_err(|e| anyhow::anyhow!("failed to write {}: {e}", output.display()))?;
        }
    }

    Ok(())
}

fn check(config: &Config) -> anyhow::Result<()> {
    let key = if config.speech.api_key().is_some() { "set" } else { "missing" };

    println!("speech provider: {:?}", config.speech.provider_type);
    println!("speech api key:  {key}");
    println!("voice / model:   {} / {}", config.speech.voice, config.speech.model);
    println!("fallback clip:   {}", config.playback.fallback_clip.display());

    verify_fallback_clip(&config.playback.fallback_clip)
}

/// Load the fallback clip the same way playback will
fn verify_fallback_clip(path: &Path) -> anyhow::Result<()> {
    let mut engine = HeadlessEngine::default();
    let handle = engine
        .load(&AudioSource::File(path.to_path_buf()))
        .map_err(|e| anyhow::anyhow!("fallback clip is not playable: {e}"))?;
    engine.release(handle);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_generated_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp3");
        let source = AudioSource::Memory {
            bytes: b"audio".to_vec(),
            content_type: "audio/mpeg".to_owned(),
        };

        export(&source, &output).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"audio");
    }

    #[test]
    fn export_copies_fallback_file() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("fallback.mp3");
        std::fs::write(&fallback, b"default").unwrap();
        let output = dir.path().join("out.mp3");

        export(&AudioSource::File(fallback), &output).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"default");
    }

    #[test]
    fn error_report_hides_vendor_detail() {
        let error = narrator_classify::RawFailure::from_http(
            429,
            r#"{"detail":{"status":"quota_exceeded","message":"0 credits left on acct 42"}}"#,
        )
        .classify();

        let report = error_report(&error);
        assert_eq!(report["type"], "rate_limit_error");
        assert_eq!(report["status"], 429);
        assert_eq!(report["message"], error.user_message());
        assert!(!report.to_string().contains("acct 42"));
    }

    #[test]
    fn missing_fallback_clip_fails_check() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_fallback_clip(&dir.path().join("absent.mp3")).unwrap_err();
        assert!(err.to_string().contains("absent.mp3"));
    }

    #[test]
    fn empty_fallback_clip_fails_check() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("empty.mp3");
        std::fs::write(&clip, b"").unwrap();
        assert!(verify_fallback_clip(&clip).is_err());
    }

    #[test]
    fn shipped_config_points_at_shipped_clip() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
        let config = Config::load(&root.join("narrator.toml")).unwrap();
        verify_fallback_clip(&root.join(&config.playback.fallback_clip)).unwrap();
    }
}
