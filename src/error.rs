use thiserror::Error;

/// Ways a single request can fail. Every variant is recoverable: the user
/// corrects the input (or just retries) and submits again.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Bad or missing input; caught before any network call
    #[error("{0}")]
    Validation(String),

    /// Transcript/page fetch failed after all strategies were tried
    #[error("{0}")]
    ContentUnavailable(String),

    /// The remote model call failed (translation or summarization)
    #[error("{0}")]
    Summarization(String),
}

impl PipelineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}
