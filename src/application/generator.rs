//! RecommendationGenerator - completion calls with bounded rate-limit retry.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::domain::dialogue::messages;
use crate::domain::recommendation::prompts::{
    city_prompt, structured_prompt, CITY_MAX_TOKENS, RECOMMEND_MAX_TOKENS,
    RECOMMEND_SYSTEM_PROMPT, RECOMMEND_TEMPERATURE,
};
use crate::domain::recommendation::{parse, RecommendationRecord};
use crate::ports::{AIProvider, CompletionRequest, CompletionResponse, MessageRole};

/// Backoff policy for rate-limited completion calls.
///
/// When the provider suggests a wait, that wait plus the padding is used;
/// otherwise the fixed fallback delay applies. Attempts are bounded, and any
/// non-rate-limit failure aborts immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Added on top of the provider's suggested wait.
    pub retry_after_padding: Duration,
    /// Wait used when the provider suggested nothing.
    pub fallback_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_after_padding: Duration::from_secs(1),
            fallback_delay: Duration::from_secs(20),
        }
    }
}

/// Generator failures, each resolving to a fixed user-facing reply.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Non-rate-limit service failure; no retry was attempted.
    #[error("recommendation service unavailable: {0}")]
    Unavailable(String),

    /// Every attempt was rate limited.
    #[error("rate limited on all {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },
}

impl GeneratorError {
    /// Localized reply shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeneratorError::Unavailable(_) => messages::RECOMMENDATION_UNAVAILABLE,
            GeneratorError::RateLimitExhausted { .. } => messages::RECOMMENDATION_RATE_LIMITED,
        }
    }
}

/// Generates travel recommendations through the completion service.
pub struct RecommendationGenerator {
    provider: Arc<dyn AIProvider>,
    policy: RetryPolicy,
}

impl RecommendationGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self::with_policy(provider, RetryPolicy::default())
    }

    pub fn with_policy(provider: Arc<dyn AIProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    /// Recommends exactly one representative city for the given keywords.
    pub async fn recommend_city(&self, keywords: &[String]) -> Result<String, GeneratorError> {
        let request = CompletionRequest::new()
            .with_system_prompt(RECOMMEND_SYSTEM_PROMPT)
            .with_message(MessageRole::User, city_prompt(keywords))
            .with_max_tokens(CITY_MAX_TOKENS)
            .with_temperature(RECOMMEND_TEMPERATURE);

        let response = self.complete_with_retry(request).await?;
        Ok(response.content.trim().to_string())
    }

    /// Produces a full structured recommendation from free-text input.
    pub async fn recommend_structured(
        &self,
        user_text: &str,
    ) -> Result<RecommendationRecord, GeneratorError> {
        let request = CompletionRequest::new()
            .with_system_prompt(RECOMMEND_SYSTEM_PROMPT)
            .with_message(MessageRole::User, structured_prompt(user_text))
            .with_max_tokens(RECOMMEND_MAX_TOKENS)
            .with_temperature(RECOMMEND_TEMPERATURE);

        let response = self.complete_with_retry(request).await?;
        let record = parse(&response.content);
        if record.is_empty() {
            tracing::warn!("recommendation reply had no recognizable sections");
        }
        Ok(record)
    }

    /// Runs one completion with the retry policy applied to rate limits.
    async fn complete_with_retry(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GeneratorError> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.provider.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_rate_limited() => {
                    if attempt >= self.policy.max_attempts {
                        tracing::warn!(attempts = attempt, "rate limited on every attempt, giving up");
                        return Err(GeneratorError::RateLimitExhausted { attempts: attempt });
                    }
                    let delay = match err.retry_after_secs() {
                        Some(secs) => {
                            Duration::from_secs(u64::from(secs)) + self.policy.retry_after_padding
                        }
                        None => self.policy.fallback_delay,
                    };
                    tracing::warn!(
                        attempt,
                        delay_secs = delay.as_secs(),
                        "rate limited, backing off before retry"
                    );
                    sleep(delay).await;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "recommendation request failed");
                    return Err(GeneratorError::Unavailable(err.to_string()));
                }
            }
        }
    }
}
