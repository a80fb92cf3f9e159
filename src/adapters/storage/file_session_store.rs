//! File-based Session Store Adapter
//!
//! Stores one YAML file per session under a base directory, so state
//! survives restarts and is easy to inspect while debugging.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::dialogue::SessionRecord;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for session records
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the record file for a session
    fn record_path(&self, session_id: SessionId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", session_id))
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        let path = self.record_path(session_id);

        if !path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        let record = serde_yaml::from_str(&yaml)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(record))
    }

    async fn save(
        &self,
        session_id: SessionId,
        record: &SessionRecord,
    ) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(record)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.record_path(session_id), yaml)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }

    async fn delete(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        let path = self.record_path(session_id);

        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}
