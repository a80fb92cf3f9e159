//! RecommendTripHandler - one-shot structured recommendation from free text.

use std::sync::Arc;

use crate::application::{GeneratorError, RecommendationGenerator, RetryPolicy};
use crate::domain::recommendation::RecommendationRecord;
use crate::ports::AIProvider;

/// Command to produce a structured recommendation.
#[derive(Debug, Clone)]
pub struct RecommendTripCommand {
    pub input: String,
}

/// Error type for the structured recommendation path.
#[derive(Debug, thiserror::Error)]
pub enum RecommendTripError {
    /// Input was missing or blank; rejected before any service call.
    #[error("input must not be empty")]
    EmptyInput,

    /// The completion service failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// Handler wrapping the structured recommendation path.
pub struct RecommendTripHandler {
    generator: RecommendationGenerator,
}

impl RecommendTripHandler {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self::with_retry_policy(provider, RetryPolicy::default())
    }

    pub fn with_retry_policy(provider: Arc<dyn AIProvider>, policy: RetryPolicy) -> Self {
        Self {
            generator: RecommendationGenerator::with_policy(provider, policy),
        }
    }

    pub async fn handle(
        &self,
        cmd: RecommendTripCommand,
    ) -> Result<RecommendationRecord, RecommendTripError> {
        let input = cmd.input.trim();
        if input.is_empty() {
            return Err(RecommendTripError::EmptyInput);
        }

        let record = self.generator.recommend_structured(input).await?;
        tracing::debug!(
            destination = %record.destination_city,
            landmark_count = record.landmarks.len(),
            "structured recommendation produced"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockAIProvider, MockError};

    #[tokio::test]
    async fn produces_structured_record() {
        let reply = "[추천 여행지]\n파리, 프랑스을 추천드립니다.\n\n[주요 명소]\n에펠탑\n루브르 박물관\n\n[추천 계절]\n봄\n\n[나라 이름]\n프랑스";
        let handler = RecommendTripHandler::new(Arc::new(
            MockAIProvider::new().with_response(reply),
        ));

        let record = handler
            .handle(RecommendTripCommand {
                input: "미술관이 많은 도시".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(record.destination_city, "프랑스");
        assert_eq!(record.landmarks, vec!["에펠탑", "루브르 박물관"]);
        assert_eq!(record.season, "봄");
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let handler = RecommendTripHandler::new(Arc::new(MockAIProvider::new()));

        let err = handler
            .handle(RecommendTripCommand {
                input: "".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RecommendTripError::EmptyInput));
    }

    #[tokio::test]
    async fn service_failure_surfaces_as_generator_error() {
        let handler = RecommendTripHandler::new(Arc::new(
            MockAIProvider::new().with_error(MockError::Unavailable {
                message: "down".to_string(),
            }),
        ));

        let err = handler
            .handle(RecommendTripCommand {
                input: "아무 곳이나".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RecommendTripError::Generator(_)));
    }
}
