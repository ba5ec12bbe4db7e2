use super::error::PipelineError;
use super::{chunker, merger};
use crate::domain::catalog::VoiceCatalog;
use crate::infrastructure::synthesis::SynthesisClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Short phrase synthesized by the "preview voice" action.
pub const PREVIEW_SAMPLE_TEXT: &str = "This is a voice sample";

/// Buffer for the per-request progress channel. Progress events are small
/// and the consumer is an SSE writer, so a shallow buffer is enough.
const PROGRESS_CHANNEL_SIZE: usize = 16;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Upper bound per chunk handed to the synthesis backend.
    pub max_chunk_chars: usize,
    /// Courtesy pause between chunk calls so the backend is not hammered.
    pub chunk_pause: Duration,
    /// Where merged artifacts are written.
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub text: String,
    pub language: String,
    pub voice: String,
}

/// One progress event of a generation request.
///
/// A request yields zero or more non-terminal updates followed by exactly
/// one terminal update. Only a successful terminal update carries artifact
/// paths; `audio` is the playable reference, `download` the downloadable
/// one (the same file today).
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub audio: Option<PathBuf>,
    pub download: Option<PathBuf>,
    pub status: String,
    pub terminal: bool,
}

impl ProgressUpdate {
    fn progress(status: String) -> Self {
        Self {
            audio: None,
            download: None,
            status,
            terminal: false,
        }
    }

    fn aborted(status: String) -> Self {
        Self {
            audio: None,
            download: None,
            status,
            terminal: true,
        }
    }

    fn done(path: PathBuf, status: String) -> Self {
        Self {
            audio: Some(path.clone()),
            download: Some(path),
            status,
            terminal: true,
        }
    }
}

/// Per-request orchestration: validate, chunk, synthesize sequentially,
/// merge, report progress along the way.
pub struct TtsPipeline {
    catalog: Arc<VoiceCatalog>,
    client: Arc<dyn SynthesisClient>,
    settings: PipelineSettings,
}

impl TtsPipeline {
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        client: Arc<dyn SynthesisClient>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            catalog,
            client,
            settings,
        }
    }

    pub fn output_dir(&self) -> &std::path::Path {
        &self.settings.output_dir
    }

    /// Start a generation request and return its progress stream.
    ///
    /// The pipeline runs on its own task; dropping the receiver cancels the
    /// request cooperatively before the next synthesis call.
    pub fn generate(self: Arc<Self>, request: GenerateRequest) -> mpsc::Receiver<ProgressUpdate> {
        let (tx, rx) = mpsc::channel(PROGRESS_CHANNEL_SIZE);
        tokio::spawn(async move {
            self.run(request, tx).await;
        });
        rx
    }

    /// Synthesize the fixed sample phrase for one voice. Single call, no
    /// chunking or merging.
    pub async fn preview(&self, language: &str, label: &str) -> Result<PathBuf, PipelineError> {
        let voice_id = self.catalog.resolve(language, label).ok_or_else(|| {
            PipelineError::MissingInput(format!(
                "no voice {:?} for language {:?}",
                label, language
            ))
        })?;

        tracing::info!(language = language, voice_id = voice_id, "Voice preview request");

        Ok(self.client.synthesize(PREVIEW_SAMPLE_TEXT, voice_id).await?)
    }

    async fn run(&self, request: GenerateRequest, tx: mpsc::Sender<ProgressUpdate>) {
        // Validating: no work before both text and voice check out.
        let voice_id = match self.catalog.resolve(&request.language, &request.voice) {
            Some(id) if !request.text.trim().is_empty() => id,
            _ => {
                tracing::warn!(
                    language = %request.language,
                    voice = %request.voice,
                    text_length = request.text.len(),
                    "Generation aborted, voice or text missing"
                );
                let _ = tx
                    .send(ProgressUpdate::aborted("Voice or text missing.".to_string()))
                    .await;
                return;
            }
        };

        let chunks = chunker::split(&request.text, self.settings.max_chunk_chars);
        let total_chunks = chunks.len();

        tracing::info!(
            language = %request.language,
            voice_id = voice_id,
            text_length = request.text.len(),
            chunk_count = total_chunks,
            "Starting chunked generation"
        );

        let mut progress_log = Vec::with_capacity(total_chunks);
        let mut artifacts: Vec<PathBuf> = Vec::with_capacity(total_chunks);

        for (index, chunk) in chunks.iter().enumerate() {
            progress_log.push(format!("Generating chunk {}/{}...", index + 1, total_chunks));

            // A send failure means the consumer is gone; stop before the
            // next backend call.
            if tx
                .send(ProgressUpdate::progress(progress_log.join("\n")))
                .await
                .is_err()
            {
                tracing::debug!(chunk_index = index, "Client disconnected, cancelling generation");
                return;
            }

            match self.client.synthesize(chunk, voice_id).await {
                Ok(path) => {
                    tracing::debug!(
                        chunk_index = index,
                        chunk_chars = chunk.chars().count(),
                        path = %path.display(),
                        "Chunk synthesized"
                    );
                    artifacts.push(path);
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        chunk_index = index,
                        chunk_count = total_chunks,
                        "Chunk synthesis failed, aborting request"
                    );
                    let _ = tx
                        .send(ProgressUpdate::aborted(format!("Failed at chunk {}", index + 1)))
                        .await;
                    return;
                }
            }

            tokio::time::sleep(self.settings.chunk_pause).await;
        }

        // Merging: all chunks succeeded.
        match merger::merge(&artifacts, &self.settings.output_dir) {
            Ok(artifact) => {
                let status = format!(
                    "Done! Total duration: {}",
                    merger::format_duration(artifact.duration)
                );
                let _ = tx.send(ProgressUpdate::done(artifact.path, status)).await;
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    chunk_count = total_chunks,
                    "Audio merge failed, aborting request"
                );
                let _ = tx
                    .send(ProgressUpdate::aborted("Failed to merge audio.".to_string()))
                    .await;
            }
        }
    }
}
