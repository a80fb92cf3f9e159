//! IntentClassifier - wraps the completion service for intent labeling.

use std::sync::Arc;

use crate::domain::dialogue::{parse_classifier_reply, ClassifiedIntent, Intent};
use crate::domain::recommendation::prompts::{
    classify_prompt, CLASSIFY_MAX_TOKENS, CLASSIFY_SYSTEM_PROMPT, CLASSIFY_TEMPERATURE,
};
use crate::ports::{AIProvider, CompletionRequest, MessageRole};

/// Classifies free-text user input into an intent plus optional keywords.
///
/// Classification never fails the request: a service failure degrades to
/// [`Intent::Unknown`] with no keywords and the pipeline continues.
pub struct IntentClassifier {
    provider: Arc<dyn AIProvider>,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    pub async fn classify(&self, user_text: &str) -> ClassifiedIntent {
        let request = CompletionRequest::new()
            .with_system_prompt(CLASSIFY_SYSTEM_PROMPT)
            .with_message(MessageRole::User, classify_prompt(user_text))
            .with_max_tokens(CLASSIFY_MAX_TOKENS)
            .with_temperature(CLASSIFY_TEMPERATURE);

        match self.provider.complete(request).await {
            Ok(response) => {
                let classified = parse_classifier_reply(&response.content);
                if classified.intent == Intent::Undetermined {
                    tracing::warn!(
                        label = %classified.label,
                        "classifier label did not match the intent vocabulary"
                    );
                }
                classified
            }
            Err(err) => {
                tracing::warn!(error = %err, "intent classification unavailable, degrading to unknown");
                ClassifiedIntent::unknown()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockAIProvider, MockError};

    #[tokio::test]
    async fn classifies_from_marker_reply() {
        let provider = MockAIProvider::new()
            .with_response("intent: 여행 추천 요청\nkeywords: 바다, 휴양");
        let classifier = IntentClassifier::new(Arc::new(provider));

        let result = classifier.classify("바다가 보이는 조용한 곳").await;

        assert_eq!(result.intent, Intent::TravelRecommendation);
        assert_eq!(result.keywords, vec!["바다", "휴양"]);
    }

    #[tokio::test]
    async fn reply_without_marker_is_undetermined() {
        let provider = MockAIProvider::new().with_response("여행 추천 요청");
        let classifier = IntentClassifier::new(Arc::new(provider));

        let result = classifier.classify("아무거나").await;

        assert_eq!(result.intent, Intent::Undetermined);
        assert!(result.keywords.is_empty());
    }

    #[tokio::test]
    async fn service_failure_degrades_to_unknown() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
        let classifier = IntentClassifier::new(Arc::new(provider));

        let result = classifier.classify("안녕하세요").await;

        assert_eq!(result.intent, Intent::Unknown);
        assert!(result.keywords.is_empty());
    }

    #[tokio::test]
    async fn rate_limit_during_classification_also_degrades() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: Some(10),
        });
        let classifier = IntentClassifier::new(Arc::new(provider));

        let result = classifier.classify("여행 가고 싶어").await;

        assert_eq!(result.intent, Intent::Unknown);
    }

    #[tokio::test]
    async fn sends_classification_prompt_to_provider() {
        let provider = MockAIProvider::new().with_response("intent: 인사");
        let provider = Arc::new(provider);
        let classifier = IntentClassifier::new(provider.clone());

        classifier.classify("안녕!").await;

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, Some(CLASSIFY_TEMPERATURE));
        assert_eq!(calls[0].max_tokens, Some(CLASSIFY_MAX_TOKENS));
        assert!(calls[0].messages[0].content.contains("안녕!"));
    }
}
