//! HTTP error mapping

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

use super::models::ErrorBody;
use crate::orchestrator::OrchestratorError;

/// Errors a handler can return; each renders as `{"error": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Orchestrator(OrchestratorError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Orchestrator(OrchestratorError::PreconditionNotMet { .. }) => StatusCode::CONFLICT,
            Self::Orchestrator(OrchestratorError::Busy { .. }) => StatusCode::CONFLICT,
            Self::Orchestrator(OrchestratorError::CompletionFailed(_)) => StatusCode::BAD_GATEWAY,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(%status, error = %self, "Request failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
