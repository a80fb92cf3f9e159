//! Session Store Port - Interface for persisting per-session dialogue state.
//!
//! The store holds one small record per session: the conversation-state flag
//! plus its last-updated time. It is read at the start of a request and
//! written at most once per request.

use async_trait::async_trait;

use crate::domain::dialogue::SessionRecord;
use crate::domain::foundation::SessionId;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session record: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session record: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading per-session dialogue state
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the record for a session, or `None` on first contact.
    async fn load(&self, session_id: SessionId) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Save the record for a session, overwriting any previous one.
    async fn save(
        &self,
        session_id: SessionId,
        record: &SessionRecord,
    ) -> Result<(), SessionStoreError>;

    /// Delete the record for a session. Deleting an absent session is a no-op.
    async fn delete(&self, session_id: SessionId) -> Result<(), SessionStoreError>;
}
