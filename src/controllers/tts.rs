use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};

use crate::{
    domain::tts::{GenerateRequest, ProgressUpdate, TtsPipeline},
    error::{AppError, AppResult},
    infrastructure::http::request_id::RequestId,
};

/// Hard cap on request text, well above the per-chunk bound; protects the
/// process from pathological payloads.
const MAX_TEXT_CHARS: usize = 100_000;

/// Request for POST /api/tts/preview
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub language: String,
    pub voice: String,
}

/// Request for POST /api/tts/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequestDto {
    pub text: String,
    pub language: String,
    pub voice: String,
}

/// One server-sent progress event of a generation request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressEventDto {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    pub terminal: bool,
}

impl From<ProgressUpdate> for ProgressEventDto {
    fn from(update: ProgressUpdate) -> Self {
        let url_for = |path: &std::path::PathBuf| {
            path.file_name()
                .map(|name| format!("/api/tts/audio/{}", name.to_string_lossy()))
        };
        Self {
            audio_url: update.audio.as_ref().and_then(&url_for),
            download_url: update.download.as_ref().and_then(&url_for),
            status: update.status,
            terminal: update.terminal,
        }
    }
}

pub struct TtsController {
    pipeline: Arc<TtsPipeline>,
}

impl TtsController {
    pub fn new(pipeline: Arc<TtsPipeline>) -> Self {
        Self { pipeline }
    }

    /// POST /api/tts/preview - synthesize the sample phrase for a voice
    pub async fn preview(
        State(controller): State<Arc<TtsController>>,
        Extension(request_id): Extension<RequestId>,
        Json(request): Json<PreviewRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        tracing::info!(
            request_id = %request_id,
            language = %request.language,
            voice = %request.voice,
            "Voice preview requested"
        );

        let path = controller
            .pipeline
            .preview(&request.language, &request.voice)
            .await
            .map_err(AppError::from)?;

        let audio = tokio::fs::read(&path)
            .await
            .map_err(|e| AppError::Internal(format!("failed to read sample audio: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "audio/mpeg".parse().unwrap());

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// POST /api/tts/generate - chunked generation with streamed progress
    ///
    /// Returns a server-sent event stream of `ProgressEventDto` JSON,
    /// terminated by exactly one event with `terminal: true`. Missing input
    /// and per-chunk failures are reported inside the stream; closing the
    /// connection cancels the request.
    pub async fn generate(
        State(controller): State<Arc<TtsController>>,
        Extension(request_id): Extension<RequestId>,
        Json(request): Json<GenerateRequestDto>,
    ) -> AppResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
        tracing::info!(
            request_id = %request_id,
            language = %request.language,
            voice = %request.voice,
            text_chars = request.text.chars().count(),
            "Generation requested"
        );

        if request.text.chars().count() > MAX_TEXT_CHARS {
            return Err(AppError::PayloadTooLarge(format!(
                "Text must be {} characters or less",
                MAX_TEXT_CHARS
            )));
        }

        let rx = controller.pipeline.clone().generate(GenerateRequest {
            text: request.text,
            language: request.language,
            voice: request.voice,
        });

        let stream = ReceiverStream::new(rx)
            .map(|update| Event::default().json_data(ProgressEventDto::from(update)));

        Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
    }

    /// GET /api/tts/audio/:file_name - download a merged artifact
    pub async fn download(
        State(controller): State<Arc<TtsController>>,
        Path(file_name): Path<String>,
    ) -> AppResult<(HeaderMap, Body)> {
        // Artifacts live in a flat directory; anything resembling a path is
        // rejected outright.
        if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
            return Err(AppError::BadRequest("invalid file name".to_string()));
        }

        let path = controller.pipeline.output_dir().join(&file_name);
        let audio = tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound(format!("no audio file {:?}", file_name)))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "audio/mpeg".parse().unwrap());
        headers.insert(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name)
                .parse()
                .map_err(|_| AppError::BadRequest("invalid file name".to_string()))?,
        );

        Ok((headers, Body::from(audio)))
    }
}
