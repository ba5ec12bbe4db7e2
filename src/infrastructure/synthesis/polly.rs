use super::client::{SynthesisClient, SynthesisError};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Voices that support the neural engine, per AWS Polly documentation.
const NEURAL_VOICES: &[&str] = &[
    // English US
    "Joanna", "Matthew", "Ruth", "Stephen", "Danielle", "Gregory", "Ivy", "Kendra", "Kimberly",
    "Salli", "Joey", "Justin", "Kevin", // English UK
    "Amy", "Emma", "Brian", "Arthur", // Spanish
    "Lucia", "Sergio", // French
    "Lea", "Remi", // German
    "Vicki", "Daniel", // Italian
    "Bianca", "Adriano", // Portuguese
    "Ines", "Camila", "Vitoria", "Thiago", // Hindi
    "Kajal",
];

fn engine_for_voice(voice_id: &str) -> Engine {
    if NEURAL_VOICES.contains(&voice_id) {
        Engine::Neural
    } else {
        Engine::Standard
    }
}

/// AWS Polly implementation of the synthesis client.
pub struct PollySynthesisClient {
    polly_client: Arc<PollyClient>,
    call_timeout: Duration,
}

impl PollySynthesisClient {
    pub fn new(polly_client: Arc<PollyClient>, call_timeout: Duration) -> Self {
        Self {
            polly_client,
            call_timeout,
        }
    }

    async fn call_polly(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
        let voice = VoiceId::from(voice_id);
        let engine = engine_for_voice(voice_id);

        tracing::info!(
            voice_id = voice_id,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let request = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice)
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send();

        let result = tokio::time::timeout(self.call_timeout, request)
            .await
            .map_err(|_| {
                tracing::error!(
                    voice_id = voice_id,
                    timeout_secs = self.call_timeout.as_secs(),
                    "AWS Polly synthesize_speech timed out"
                );
                SynthesisError::Timeout
            })?
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice_id = voice_id,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                SynthesisError::Backend(format!("AWS Polly error: {:?}", e))
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            SynthesisError::Backend(format!("failed to read audio stream: {}", e))
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl SynthesisClient for PollySynthesisClient {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<PathBuf, SynthesisError> {
        let audio_bytes = self.call_polly(text, voice_id).await?;

        let mut file = tempfile::Builder::new()
            .prefix("tts_chunk_")
            .suffix(".mp3")
            .tempfile()?;
        file.write_all(&audio_bytes)?;

        // Keep the file on disk past the handle; the pipeline owns it now.
        let (_, path) = file.keep().map_err(|e| SynthesisError::Io(e.error))?;

        tracing::debug!(
            path = %path.display(),
            audio_size = audio_bytes.len(),
            "Chunk audio persisted"
        );

        Ok(path)
    }
}
