use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use voicegen_backend::controllers::{TtsController, VoicesController};
use voicegen_backend::domain::catalog::VoiceCatalog;
use voicegen_backend::domain::tts::{PipelineSettings, TtsPipeline};
use voicegen_backend::infrastructure::http::build_router;
use voicegen_backend::infrastructure::synthesis::{SynthesisClient, SynthesisError};

/// One MPEG-1 Layer III frame: 128 kbps, 44.1 kHz, 417 bytes, 1152 samples.
/// Payload bytes are irrelevant for the format-level duration walk.
pub const MP3_FRAME_BYTES: usize = 417;

pub fn mp3_frames(count: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(count * MP3_FRAME_BYTES);
    for _ in 0..count {
        let mut frame = vec![0u8; MP3_FRAME_BYTES];
        frame[0] = 0xFF;
        frame[1] = 0xFB;
        frame[2] = 0x90;
        frame[3] = 0x00;
        bytes.extend_from_slice(&frame);
    }
    bytes
}

/// Scripted stand-in for the Polly client: fails on the 1-based call
/// indices in `fail_on`, writes playable frames otherwise.
pub struct ScriptedClient {
    dir: PathBuf,
    frames_per_chunk: usize,
    fail_on: Vec<usize>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisClient for ScriptedClient {
    async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<PathBuf, SynthesisError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.contains(&call) {
            return Err(SynthesisError::Backend("scripted failure".to_string()));
        }
        let path = self.dir.join(format!("chunk_{}.mp3", call));
        fs::write(&path, mp3_frames(self.frames_per_chunk))?;
        Ok(path)
    }
}

pub struct TestContext {
    pub router: Router,
    pub client: Arc<ScriptedClient>,
    // Held so chunk and merged artifacts survive for the test's lifetime
    pub output_dir: tempfile::TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_pipeline(4500, vec![])
    }

    pub fn with_pipeline(max_chunk_chars: usize, fail_on: Vec<usize>) -> Self {
        let output_dir = tempfile::tempdir().unwrap();
        let client = Arc::new(ScriptedClient {
            dir: output_dir.path().to_path_buf(),
            frames_per_chunk: 20,
            fail_on,
            calls: AtomicUsize::new(0),
        });

        let catalog = Arc::new(VoiceCatalog::default());
        let pipeline = Arc::new(TtsPipeline::new(
            catalog.clone(),
            client.clone(),
            PipelineSettings {
                max_chunk_chars,
                chunk_pause: Duration::from_millis(0),
                output_dir: output_dir.path().to_path_buf(),
            },
        ));

        let router = build_router(
            catalog.clone(),
            Arc::new(VoicesController::new(catalog)),
            Arc::new(TtsController::new(pipeline)),
        );

        Self {
            router,
            client,
            output_dir,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, HeaderMap, Bytes) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }
}

/// Parse the `data:` payloads of an SSE body into JSON values.
pub fn parse_sse_events(body: &Bytes) -> Vec<serde_json::Value> {
    let text = String::from_utf8(body.to_vec()).unwrap();
    text.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|payload| serde_json::from_str(payload.trim()).unwrap())
        .collect()
}
