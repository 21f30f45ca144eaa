mod harness;

use harness::config::config_for;
use harness::mock_speech::{DEFAULT_AUDIO, MockReply, MockSpeech};
use narrator_classify::ErrorKind;
use narrator_playback::testing::{EngineCall, RecordingEngine};
use narrator_playback::{AudioSource, Notice, Origin, PlaybackStatus};
use narrator_session::{Admission, Completion, NarrationSession};

fn session_for(mock: &MockSpeech, api_key: &str) -> (NarrationSession<RecordingEngine>, RecordingEngine) {
    let config = config_for(&mock.base_url(), api_key);
    let engine = RecordingEngine::new();
    let session = NarrationSession::from_config(engine.clone(), &config.speech, &config.playback);
    (session, engine)
}

fn expect_failed(completion: Completion) -> narrator_classify::ClassifiedError {
    match completion {
        Completion::Failed(error) => error,
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn generated_audio_replaces_fallback() {
    let mock = MockSpeech::start().await.unwrap();
    let (mut session, engine) = session_for(&mock, "test-key");
    session.story_ready();

    let completion = session.narrate("Once upon a time").await;
    assert_eq!(completion, Completion::Applied);

    let controller = session.controller();
    assert_eq!(controller.status(), PlaybackStatus::Ready);
    assert_eq!(controller.origin(), Some(Origin::Generated));
    assert!(controller.notice().is_none());

    let resource = controller.resource().unwrap();
    match resource.source() {
        AudioSource::Memory { bytes, content_type } => {
            assert_eq!(bytes, DEFAULT_AUDIO);
            assert_eq!(content_type, "audio/mpeg");
        }
        AudioSource::File(path) => panic!("expected generated audio, got {}", path.display()),
    }

    // fallback handle released once the generated one is in place
    assert_eq!(engine.release_count(1), 1);
    assert_eq!(engine.live_handles(), vec![2]);
}

#[tokio::test]
async fn request_carries_key_voice_and_model() {
    let mock = MockSpeech::start().await.unwrap();
    let (mut session, _engine) = session_for(&mock, "test-key");

    session.narrate("  The end.  ").await;

    let received = mock.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].voice, "test-voice");
    assert_eq!(received[0].api_key.as_deref(), Some("test-key"));
    assert_eq!(received[0].body["text"], "The end.");
    assert_eq!(received[0].body["model_id"], "eleven_multilingual_v2");
}

#[tokio::test]
async fn quota_exhaustion_keeps_fallback_playing() {
    let mock = MockSpeech::start_with(vec![MockReply::json_error(
        429,
        &serde_json::json!({"detail": {"status": "quota_exceeded", "message": "You have 0 credits left"}}),
    )])
    .await
    .unwrap();
    let (mut session, engine) = session_for(&mock, "test-key");

    session.story_ready();
    session.controller_mut().play().unwrap();

    let error = expect_failed(session.narrate("A long story").await);
    assert_eq!(error.kind(), ErrorKind::Quota);
    assert!(error.raw_detail().contains("quota_exceeded"));

    let controller = session.controller();
    assert_eq!(controller.status(), PlaybackStatus::Playing);
    assert_eq!(controller.origin(), Some(Origin::Fallback));
    assert_eq!(
        controller.notice().map(Notice::message),
        Some(ErrorKind::Quota.user_message())
    );

    // playback was never interrupted
    assert!(!engine.calls().iter().any(|call| matches!(call, EngineCall::Halt { .. })));
}

#[tokio::test]
async fn rejected_key_is_an_auth_failure() {
    let mock = MockSpeech::start_with(vec![MockReply::json_error(
        401,
        &serde_json::json!({"detail": {"status": "invalid_api_key", "message": "Invalid API key"}}),
    )])
    .await
    .unwrap();
    let (mut session, _engine) = session_for(&mock, "wrong-key");

    let error = expect_failed(session.narrate("Hello").await);
    assert_eq!(error.kind(), ErrorKind::AuthFailure);
    assert_eq!(error.user_message(), ErrorKind::AuthFailure.user_message());
    assert_eq!(session.controller().origin(), Some(Origin::Fallback));
}

#[tokio::test]
async fn html_server_error_is_network_or_unknown() {
    let mock = MockSpeech::start_with(vec![MockReply::text_error(
        500,
        "<html><body>Internal Server Error</body></html>",
    )])
    .await
    .unwrap();
    let (mut session, _engine) = session_for(&mock, "test-key");

    let error = expect_failed(session.narrate("Hello").await);
    assert_eq!(error.kind(), ErrorKind::NetworkOrUnknown);
    assert_eq!(
        session.controller().notice(),
        Some(&Notice::generation_failed(&error))
    );
}

#[tokio::test]
async fn missing_key_never_contacts_upstream() {
    let mock = MockSpeech::start().await.unwrap();
    let (mut session, _engine) = session_for(&mock, "");

    let error = expect_failed(session.narrate("Hello").await);
    assert_eq!(error.kind(), ErrorKind::Configuration);
    assert_eq!(mock.request_count(), 0);

    let controller = session.controller();
    assert_eq!(controller.status(), PlaybackStatus::Ready);
    assert_eq!(controller.origin(), Some(Origin::Fallback));
}

#[tokio::test]
async fn oversized_input_never_contacts_upstream() {
    let mock = MockSpeech::start().await.unwrap();
    let (mut session, _engine) = session_for(&mock, "test-key");

    let error = expect_failed(session.narrate(&"a".repeat(201)).await);
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn failure_after_success_keeps_generated_audio() {
    let mock = MockSpeech::start_with(vec![
        MockReply::audio(b"first narration"),
        MockReply::json_error(429, &serde_json::json!({"detail": {"status": "quota_exceeded"}})),
    ])
    .await
    .unwrap();
    let (mut session, _engine) = session_for(&mock, "test-key");

    assert_eq!(session.narrate("Chapter one").await, Completion::Applied);

    let error = expect_failed(session.narrate("Chapter two").await);
    assert_eq!(error.kind(), ErrorKind::Quota);

    let controller = session.controller();
    assert_eq!(controller.origin(), Some(Origin::Generated));
    match controller.resource().unwrap().source() {
        AudioSource::Memory { bytes, .. } => assert_eq!(bytes, b"first narration"),
        AudioSource::File(_) => panic!("generated audio was replaced by the fallback"),
    }
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn superseded_result_is_discarded() {
    let mock = MockSpeech::start_with(vec![MockReply::audio(b"old text"), MockReply::audio(b"new text")])
        .await
        .unwrap();
    let (mut session, _engine) = session_for(&mock, "test-key");
    session.story_ready();

    let Ok(Admission::Started(first)) = session.begin_generation("Old text") else {
        panic!("first generation not started");
    };
    let Ok(Admission::Started(second)) = session.begin_generation("New text") else {
        panic!("second generation not started");
    };

    let first = first.run().await;
    let second = second.run().await;

    assert_eq!(session.complete(first), Completion::Stale);
    assert_eq!(session.controller().origin(), Some(Origin::Fallback));

    assert_eq!(session.complete(second), Completion::Applied);
    match session.controller().resource().unwrap().source() {
        AudioSource::Memory { bytes, .. } => assert_eq!(bytes, b"new text"),
        AudioSource::File(_) => panic!("expected generated audio"),
    }
}
