//! LlmClient trait definition

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{CompletionRequest, CompletionResponse, LlmError, StopReason};

/// Stateless LLM client - each call is independent
///
/// No conversation state is kept between calls. Anything the model should
/// remember has to be flattened into the request's prompt by the caller.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model identifier sent with every request
    fn model(&self) -> &str;

    /// Complete and return the generated text verbatim
    ///
    /// A response without a text block is a malformed response. A reply cut
    /// off by the token budget is still returned, with a warning.
    async fn complete_text(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let max_tokens = request.max_tokens;
        let response = self.complete(request).await?;
        if response.stop_reason == StopReason::MaxTokens {
            warn!(max_tokens, model = self.model(), "Completion truncated at the token budget");
        }
        debug!(
            output_tokens = response.usage.output_tokens,
            cost_usd = response.usage.cost_usd(self.model()),
            "complete_text: response received"
        );
        response
            .content
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no text block".to_string()))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock LLM client for unit tests
    ///
    /// Replies are consumed in order; `None` produces an API error.
    pub struct MockLlmClient {
        replies: Vec<Option<String>>,
        call_count: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlmClient {
        pub fn new(replies: Vec<&str>) -> Self {
            Self::with_replies(replies.into_iter().map(|r| Some(r.to_string())).collect())
        }

        pub fn with_replies(replies: Vec<Option<String>>) -> Self {
            debug!(reply_count = %replies.len(), "MockLlmClient::with_replies: called");
            Self {
                replies,
                call_count: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Requests received so far, in call order
        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request);
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.replies.get(idx) {
                Some(Some(text)) => Ok(CompletionResponse::text(text.clone())),
                Some(None) => Err(LlmError::ApiError {
                    status: 500,
                    message: "mock failure".to_string(),
                }),
                None => Err(LlmError::InvalidResponse("No more mock responses".to_string())),
            }
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_replies_in_order() {
            let client = MockLlmClient::new(vec!["Response 1", "Response 2"]);

            let req = CompletionRequest::new("Test", 1000);
            assert_eq!(client.complete_text(req.clone()).await.unwrap(), "Response 1");
            assert_eq!(client.complete_text(req).await.unwrap(), "Response 2");
            assert_eq!(client.call_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            let result = client.complete(CompletionRequest::new("Test", 1000)).await;
            assert!(result.is_err());
        }
    }
}
