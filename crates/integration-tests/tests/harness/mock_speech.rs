//! Mock upstream speech service for integration tests
//!
//! Mimics the `ElevenLabs` text-to-speech endpoint and answers with queued
//! replies, then with a default audio reply once the queue is empty

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Audio bytes returned when no reply is queued
pub const DEFAULT_AUDIO: &[u8] = b"ID3-mock-narration";

/// Canned reply from the mock
#[derive(Debug, Clone)]
pub struct MockReply {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

impl MockReply {
    /// Successful reply carrying `audio`
    pub fn audio(audio: &[u8]) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "audio/mpeg",
            body: audio.to_vec(),
        }
    }

    /// Error reply with a JSON body
    pub fn json_error(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    /// Error reply with a plain text or HTML body
    pub fn text_error(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type: "text/html",
            body: body.as_bytes().to_vec(),
        }
    }
}

/// Request as seen by the mock
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub voice: String,
    pub api_key: Option<String>,
    pub body: serde_json::Value,
}

/// Mock speech backend
pub struct MockSpeech {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSpeechState>,
}

struct MockSpeechState {
    request_count: AtomicU32,
    replies: Mutex<VecDeque<MockReply>>,
    received: Mutex<Vec<ReceivedRequest>>,
}

impl MockSpeech {
    /// Start a mock that always returns [`DEFAULT_AUDIO`]
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Vec::new()).await
    }

    /// Start a mock that answers with `replies` in order
    pub async fn start_with(replies: Vec<MockReply>) -> anyhow::Result<Self> {
        let state = Arc::new(MockSpeechState {
            request_count: AtomicU32::new(0),
            replies: Mutex::new(replies.into()),
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/text-to-speech/{voice}", routing::post(handle_speech))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for the speech provider configuration
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of synthesis requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Requests received so far
    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.state.received.lock().unwrap().clone()
    }
}

impl Drop for MockSpeech {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_speech(
    State(state): State<Arc<MockSpeechState>>,
    Path(voice): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    state.received.lock().unwrap().push(ReceivedRequest {
        voice,
        api_key: headers
            .get("xi-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body,
    });

    let reply = state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| MockReply::audio(DEFAULT_AUDIO));

    (reply.status, [(header::CONTENT_TYPE, reply.content_type)], reply.body).into_response()
}
