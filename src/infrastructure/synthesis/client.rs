use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis backend error: {0}")]
    Backend(String),

    #[error("synthesis call timed out")]
    Timeout,

    #[error("failed to persist chunk audio: {0}")]
    Io(#[from] std::io::Error),
}

/// Client for the external speech-synthesis backend.
///
/// Abstracts the underlying TTS provider (AWS Polly, ElevenLabs, etc.)
///
/// Implementations are responsible for:
/// - One remote call per invocation, no splitting or merging
/// - Writing the returned audio to a fresh, uniquely named temp file
/// - Mapping every backend failure mode into `SynthesisError`
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    /// Synthesize `text` with the given backend voice id.
    ///
    /// On success returns the path of a temp file holding the audio (MP3).
    /// The file outlives the call; cleanup is left to the OS temp lifetime.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<PathBuf, SynthesisError>;
}
