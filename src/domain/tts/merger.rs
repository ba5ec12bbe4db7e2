use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("no chunk artifacts to merge")]
    Empty,

    #[error("failed to read/write audio: {0}")]
    Io(#[from] std::io::Error),

    #[error("merged output is not valid audio: {0}")]
    UnrecognizedFormat(String),
}

/// The single audio output of a request.
#[derive(Debug, Clone)]
pub struct MergedArtifact {
    pub path: PathBuf,
    pub duration: Duration,
}

/// Concatenate chunk artifacts, in order, into one audio file.
///
/// The output is written under `output_dir` with a timestamp-derived name
/// plus a random suffix so concurrent requests never collide. The total
/// duration is computed from the merged file itself.
pub fn merge(paths: &[PathBuf], output_dir: &Path) -> Result<MergedArtifact, MergeError> {
    if paths.is_empty() {
        return Err(MergeError::Empty);
    }

    let mut merged = Vec::new();
    for path in paths {
        let bytes = fs::read(path)?;
        merged.extend_from_slice(&bytes);
    }

    let file_name = format!(
        "voice_output_{}_{}.mp3",
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        uuid::Uuid::new_v4().simple()
    );
    let output_path = output_dir.join(file_name);
    fs::write(&output_path, &merged)?;

    let duration = probe_duration(&output_path)?;

    tracing::info!(
        output = %output_path.display(),
        chunk_count = paths.len(),
        merged_bytes = merged.len(),
        duration_secs = duration.as_secs_f64(),
        "Chunk artifacts merged"
    );

    Ok(MergedArtifact {
        path: output_path,
        duration,
    })
}

/// Total duration of an audio file, by walking every packet.
///
/// Header-derived frame counts only describe the first segment of a
/// concatenated MP3, so the whole file is walked instead.
pub fn probe_duration(path: &Path) -> Result<Duration, MergeError> {
    let file = fs::File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| MergeError::UnrecognizedFormat(e.to_string()))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| MergeError::UnrecognizedFormat("no audio track found".to_string()))?;
    let track_id = track.id;
    let time_base = track.codec_params.time_base;
    let sample_rate = track.codec_params.sample_rate;

    let mut total_frames: u64 = 0;
    loop {
        match format.next_packet() {
            Ok(packet) => {
                if packet.track_id() == track_id {
                    total_frames += packet.dur();
                }
            }
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(MergeError::UnrecognizedFormat(e.to_string())),
        }
    }

    if let Some(tb) = time_base {
        let time = tb.calc_time(total_frames);
        Ok(Duration::from_secs_f64(time.seconds as f64 + time.frac))
    } else if let Some(rate) = sample_rate {
        Ok(Duration::from_secs_f64(total_frames as f64 / rate as f64))
    } else {
        Err(MergeError::UnrecognizedFormat(
            "track has no time base or sample rate".to_string(),
        ))
    }
}

/// Format a duration as `H:MM:SS` for user-facing status strings.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}
