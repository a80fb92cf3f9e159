//! ProcessInputHandler - the dialogue controller.
//!
//! One request runs load state → classify → transition → act → persist,
//! serialized per session so concurrent requests cannot interleave the
//! read-modify-write of the state flag. Sessions never lock each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::{IntentClassifier, RecommendationGenerator, RetryPolicy};
use crate::domain::dialogue::{messages, transition, DialogueAction, SessionRecord};
use crate::domain::foundation::SessionId;
use crate::ports::{AIProvider, SessionStore, SessionStoreError};

/// Command to process one turn of user input.
#[derive(Debug, Clone)]
pub struct ProcessInputCommand {
    pub session_id: SessionId,
    pub input: String,
}

/// Result of processing one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInputResult {
    /// The classified intent label, as returned by the classifier.
    pub intent_label: String,
    /// User-facing reply.
    pub message: String,
    /// Recommended city, when this turn produced one.
    pub recommendation: Option<String>,
}

/// Error type for processing input.
#[derive(Debug, thiserror::Error)]
pub enum ProcessInputError {
    /// Input was missing or blank; rejected before any service call.
    #[error("input must not be empty")]
    EmptyInput,

    /// Session store failure.
    #[error("session store error: {0}")]
    Store(String),
}

impl From<SessionStoreError> for ProcessInputError {
    fn from(err: SessionStoreError) -> Self {
        ProcessInputError::Store(err.to_string())
    }
}

/// Handler orchestrating the dialogue state machine.
pub struct ProcessInputHandler {
    store: Arc<dyn SessionStore>,
    classifier: IntentClassifier,
    generator: RecommendationGenerator,
    /// Per-session locks serializing the read-modify-write cycle.
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl ProcessInputHandler {
    pub fn new(store: Arc<dyn SessionStore>, provider: Arc<dyn AIProvider>) -> Self {
        Self::with_retry_policy(store, provider, RetryPolicy::default())
    }

    pub fn with_retry_policy(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn AIProvider>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            store,
            classifier: IntentClassifier::new(provider.clone()),
            generator: RecommendationGenerator::with_policy(provider, policy),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessInputCommand,
    ) -> Result<ProcessInputResult, ProcessInputError> {
        let input = cmd.input.trim();
        if input.is_empty() {
            return Err(ProcessInputError::EmptyInput);
        }

        let lock = self.session_lock(cmd.session_id).await;
        let _guard = lock.lock().await;

        let record = self.store.load(cmd.session_id).await?.unwrap_or_default();
        let classified = self.classifier.classify(input).await;

        tracing::debug!(
            session = %cmd.session_id,
            state = ?record.state,
            intent = ?classified.intent,
            keyword_count = classified.keywords.len(),
            "processing turn"
        );

        let (action, next_state) = transition(record.state, classified.intent, &classified.keywords);

        let (message, recommendation) = match action {
            DialogueAction::PromptForKeywords => {
                (messages::PROMPT_FOR_KEYWORDS.to_string(), None)
            }
            DialogueAction::NotUnderstood => (messages::NOT_UNDERSTOOD.to_string(), None),
            DialogueAction::Recommend { keywords } => {
                match self.generator.recommend_city(&keywords).await {
                    Ok(city) => (messages::recommend_city_reply(&city), Some(city)),
                    Err(err) => (err.user_message().to_string(), None),
                }
            }
        };

        // The write happens once, after the next state is determined.
        self.store
            .save(cmd.session_id, &SessionRecord::new(next_state))
            .await?;

        Ok(ProcessInputResult {
            intent_label: classified.label,
            message,
            recommendation,
        })
    }

    async fn session_lock(&self, session_id: SessionId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
