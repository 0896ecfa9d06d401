//! Compose-and-complete plumbing shared by the session orchestrator and the
//! stateless HTTP routes

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::OrchestratorError;
use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::prompts::{PromptComposer, PromptInputs, RequestKind};

/// A client, a composer and the deadline for one completion call
#[derive(Clone)]
pub struct Generator {
    client: Arc<dyn LlmClient>,
    composer: Arc<PromptComposer>,
    timeout: Duration,
}

impl Generator {
    pub fn new(client: Arc<dyn LlmClient>, composer: Arc<PromptComposer>, timeout: Duration) -> Self {
        Self {
            client,
            composer,
            timeout,
        }
    }

    /// Build the request, rejecting missing inputs before any call is made
    pub fn compose(&self, kind: RequestKind, inputs: &PromptInputs) -> Result<CompletionRequest, OrchestratorError> {
        Ok(self.composer.compose(kind, inputs)?)
    }

    /// Send one request, bounded by the completion timeout
    pub async fn complete(&self, request: CompletionRequest) -> Result<String, OrchestratorError> {
        debug!(
            prompt_len = request.prompt.len(),
            max_tokens = request.max_tokens,
            "complete: called"
        );
        match tokio::time::timeout(self.timeout, self.client.complete_text(request)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                warn!(error = %e, "Completion request failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Completion request timed out");
                Err(LlmError::Timeout(self.timeout).into())
            }
        }
    }

    /// Compose and complete in one step
    pub async fn generate(&self, kind: RequestKind, inputs: &PromptInputs) -> Result<String, OrchestratorError> {
        debug!(%kind, "generate: called");
        let request = self.compose(kind, inputs)?;
        self.complete(request).await
    }
}
