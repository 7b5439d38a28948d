//! JSON-file conversation log store.
//!
//! Persists the whole conversation log as a single JSON array in one
//! file, overwritten wholesale on every save. Load is tolerant: a
//! missing file or unparseable content yields an empty log; other I/O
//! failures (permissions, etc.) surface as errors.

use std::path::{Path, PathBuf};

use carousel_core::history::HistoryStore;
use carousel_types::chat::ConversationLog;
use carousel_types::error::HistoryError;

/// Flat-file history store.
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistoryStore {
    async fn load(&self) -> Result<ConversationLog, HistoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no history file, starting empty");
                return Ok(ConversationLog::new());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&content) {
            Ok(log) => Ok(log),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "history file is not valid JSON, starting empty"
                );
                Ok(ConversationLog::new())
            }
        }
    }

    async fn save(&self, log: &ConversationLog) -> Result<(), HistoryError> {
        let json = serde_json::to_vec(log)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
