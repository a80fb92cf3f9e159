//! In-Memory Session Store Adapter
//!
//! Stores session records in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::SessionRecord;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for session records
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored records (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when no session is stored
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        let records = self.records.read().await;
        Ok(records.get(&session_id).cloned())
    }

    async fn save(
        &self,
        session_id: SessionId,
        record: &SessionRecord,
    ) -> Result<(), SessionStoreError> {
        let mut records = self.records.write().await;
        records.insert(session_id, record.clone());
        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        self.records.write().await.remove(&session_id);
        Ok(())
    }
}
