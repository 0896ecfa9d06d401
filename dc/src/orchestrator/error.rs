//! Orchestrator error types

use thiserror::Error;

use crate::llm::LlmError;
use crate::prompts::ComposeError;

/// Errors returned by orchestrator operations
///
/// None of these are retried, and none leave the session inconsistent.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Caller input was missing or blank; the service was not called
    #[error("{0}")]
    Validation(String),

    /// An artifact the operation depends on has not been generated yet
    #[error("Generate the {artifact} first")]
    PreconditionNotMet { artifact: &'static str },

    /// The same artifact is already being generated for this session
    #[error("{artifact} generation is already in progress")]
    Busy { artifact: &'static str },

    /// The completion service failed, timed out or returned nothing usable
    #[error("Completion failed: {0}")]
    CompletionFailed(#[from] LlmError),
}

impl From<ComposeError> for OrchestratorError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::MissingField(_) => Self::Validation(err.to_string()),
            ComposeError::Template(msg) => Self::CompletionFailed(LlmError::InvalidResponse(format!(
                "Prompt rendering failed: {}",
                msg
            ))),
        }
    }
}
