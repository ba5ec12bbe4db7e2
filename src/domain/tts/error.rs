use crate::error::AppError;
use crate::infrastructure::synthesis::SynthesisError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("missing input: {0}")]
    MissingInput(String),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::MissingInput(msg) => AppError::BadRequest(msg),
            PipelineError::Synthesis(e) => AppError::ExternalService(e.to_string()),
        }
    }
}
