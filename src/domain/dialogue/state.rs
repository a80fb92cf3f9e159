//! Per-session conversation state and the slot-filling transition table.

use serde::{Deserialize, Serialize};

use super::intent::Intent;
use crate::domain::foundation::Timestamp;

/// Per-session dialogue state flag.
///
/// Created as `Idle` on first contact, flipped to `AwaitingKeywords` when a
/// travel request arrives without keywords, and back to `Idle` once the slot
/// is filled (or the request falls out of the travel flow).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingKeywords,
}

/// The persisted record for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub state: ConversationState,
    pub updated_at: Timestamp,
}

impl SessionRecord {
    /// Creates a record in the given state, stamped now.
    pub fn new(state: ConversationState) -> Self {
        Self {
            state,
            updated_at: Timestamp::now(),
        }
    }

    /// The record used for a session's first contact.
    pub fn idle() -> Self {
        Self::new(ConversationState::Idle)
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::idle()
    }
}

/// What the controller should do for the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueAction {
    /// Ask the user which destination style they want.
    PromptForKeywords,
    /// Generate a recommendation from the collected keywords.
    Recommend { keywords: Vec<String> },
    /// Reply that the request was not understood.
    NotUnderstood,
}

/// The slot-filling transition table.
///
/// When the session is already awaiting keywords, a keyword-bearing turn
/// fires the recommendation regardless of the classified intent label: the
/// conversation is in a narrowed slot-filling context and the keywords are
/// the answer to our own question.
pub fn transition(
    state: ConversationState,
    intent: Intent,
    keywords: &[String],
) -> (DialogueAction, ConversationState) {
    let has_keywords = !keywords.is_empty();

    match (state, intent.is_travel_recommendation(), has_keywords) {
        (ConversationState::AwaitingKeywords, _, true) | (_, true, true) => (
            DialogueAction::Recommend {
                keywords: keywords.to_vec(),
            },
            ConversationState::Idle,
        ),
        (_, true, false) => (
            DialogueAction::PromptForKeywords,
            ConversationState::AwaitingKeywords,
        ),
        (_, false, _) => (DialogueAction::NotUnderstood, ConversationState::Idle),
    }
}
