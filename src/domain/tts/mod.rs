pub mod chunker;
pub mod error;
pub mod merger;
pub mod pipeline;

pub use chunker::DEFAULT_MAX_CHUNK_CHARS;
pub use error::PipelineError;
pub use merger::{MergeError, MergedArtifact};
pub use pipeline::{
    GenerateRequest, PipelineSettings, ProgressUpdate, TtsPipeline, PREVIEW_SAMPLE_TEXT,
};
