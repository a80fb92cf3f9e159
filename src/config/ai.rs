//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL override (for proxies and tests)
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Total rate-limit retry attempts, including the first
    #[serde(default = "default_retry_attempts")]
    pub retry_max_attempts: u32,

    /// Backoff used when the provider suggests no wait, in seconds
    #[serde(default = "default_retry_fallback")]
    pub retry_fallback_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Backoff used when the provider suggests no wait
    pub fn retry_fallback_delay(&self) -> Duration {
        Duration::from_secs(self.retry_fallback_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
        }
        if self.retry_max_attempts == 0 {
            return Err(ValidationError::InvalidRetryAttempts);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: None,
            timeout_secs: default_timeout(),
            retry_max_attempts: default_retry_attempts(),
            retry_fallback_secs: default_retry_fallback(),
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_fallback() -> u64 {
    20
}
