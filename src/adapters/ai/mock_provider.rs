//! Mock AI Provider for testing.
//!
//! Configurable mock implementation of the AIProvider port, allowing tests
//! to run without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection for resilience testing
//! - Simulated latency
//! - Call tracking for verification, including a concurrent-call watermark
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("intent: 인사")
//!     .with_delay(Duration::from_millis(100));
//!
//! let response = provider.complete(request).await?;
//! assert_eq!(response.content, "intent: 인사");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Calls currently inside `complete`.
    in_flight: Arc<AtomicUsize>,
    /// Highest concurrent call count observed.
    max_in_flight: Arc<AtomicUsize>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success { content: String },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: Option<u32> },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(MockResponse::Success {
            content: content.into(),
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets a simulated latency applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns all requests received so far.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Highest number of calls that were ever inside `complete` at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.calls.lock().unwrap().push(request);

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match next {
            Some(MockResponse::Success { content }) => Ok(CompletionResponse {
                content,
                model: "mock-model-1".to_string(),
            }),
            Some(MockResponse::Error(err)) => Err(err.into()),
            // An exhausted queue answers with an empty completion so
            // long-running tests don't have to enumerate every call.
            None => Ok(CompletionResponse {
                content: String::new(),
                model: "mock-model-1".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str) -> CompletionRequest {
        CompletionRequest::new().with_message(crate::ports::MessageRole::User, content)
    }

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_response("second");

        let one = provider.complete(request("a")).await.unwrap();
        let two = provider.complete(request("b")).await.unwrap();

        assert_eq!(one.content, "first");
        assert_eq!(two.content, "second");
    }

    #[tokio::test]
    async fn errors_are_injected() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: Some(7),
        });

        let err = provider.complete(request("a")).await.unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after_secs(), Some(7));
    }

    #[tokio::test]
    async fn exhausted_queue_yields_empty_completion() {
        let provider = MockAIProvider::new();
        let response = provider.complete(request("a")).await.unwrap();
        assert_eq!(response.content, "");
    }

    #[tokio::test]
    async fn tracks_call_history() {
        let provider = MockAIProvider::new().with_response("ok");
        provider.complete(request("hello")).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.calls()[0].messages[0].content, "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn watermark_counts_concurrent_calls() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(50));

        let first = provider.clone();
        let second = provider.clone();
        let a = tokio::spawn(async move { first.complete(request("a")).await });
        let b = tokio::spawn(async move { second.complete(request("b")).await });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(provider.max_in_flight(), 2);
    }
}
