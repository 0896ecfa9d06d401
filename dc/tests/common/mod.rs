//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dealcoach::config::GenerationConfig;
use dealcoach::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use dealcoach::orchestrator::Generator;
use dealcoach::prompts::{PromptComposer, PromptLoader};

/// Completion client with scripted replies and an optional delay
///
/// Scripted replies are used first (`None` fails the call); after that every
/// call answers `reply <n>` with its 1-based call number.
pub struct FakeClient {
    script: Mutex<VecDeque<Option<String>>>,
    delay: Duration,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeClient {
    pub fn echo() -> Arc<Self> {
        Self::build(Vec::new(), Duration::ZERO)
    }

    pub fn scripted(replies: Vec<&str>) -> Arc<Self> {
        Self::build(replies.into_iter().map(|r| Some(r.to_string())).collect(), Duration::ZERO)
    }

    pub fn with_script(script: Vec<Option<String>>) -> Arc<Self> {
        Self::build(script, Duration::ZERO)
    }

    pub fn delayed(delay: Duration) -> Arc<Self> {
        Self::build(Vec::new(), delay)
    }

    fn build(script: Vec<Option<String>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            delay,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.prompt.clone()).collect()
    }

    pub fn max_tokens(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|r| r.max_tokens).collect()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let scripted = self.script.lock().unwrap().pop_front();

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match scripted {
            Some(Some(text)) => Ok(CompletionResponse::text(text)),
            Some(None) => Err(LlmError::ApiError {
                status: 503,
                message: "scripted failure".to_string(),
            }),
            None => Ok(CompletionResponse::text(format!("reply {}", n))),
        }
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// Generator over the embedded prompts with default budgets
pub fn generator(client: Arc<FakeClient>) -> Generator {
    generator_with_timeout(client, Duration::from_secs(60))
}

pub fn generator_with_timeout(client: Arc<FakeClient>, timeout: Duration) -> Generator {
    let loader = PromptLoader::embedded_only().expect("embedded prompts compile");
    let composer = PromptComposer::new(loader, &GenerationConfig::default());
    Generator::new(client, Arc::new(composer), timeout)
}
