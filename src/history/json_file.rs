use super::HistoryStore;
use crate::error::AssistantError;
use crate::model::HistoryEntry;
use async_trait::async_trait;
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// History stored as one pretty-printed JSON array.
///
/// Every change rewrites the whole file. A missing or unreadable-as-JSON file
/// counts as an empty history.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileHistory { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<HistoryEntry>, AssistantError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(persistence_error(&self.path, e)),
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "Ignoring unreadable history file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    async fn store(&self, entries: &[HistoryEntry]) -> Result<(), AssistantError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| persistence_error(parent, e))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| AssistantError::PersistenceFailed(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| persistence_error(&self.path, e))?;

        debug!(
            "Wrote {} history entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn persistence_error(path: &Path, e: std::io::Error) -> AssistantError {
    AssistantError::PersistenceFailed(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl HistoryStore for JsonFileHistory {
    async fn append(&self, entry: HistoryEntry) -> Result<(), AssistantError> {
        let mut entries = self.load().await?;
        entries.push(entry);
        self.store(&entries).await
    }

    async fn entries(&self) -> Result<Vec<HistoryEntry>, AssistantError> {
        self.load().await
    }

    async fn delete(&self, index: usize) -> Result<HistoryEntry, AssistantError> {
        let mut entries = self.load().await?;
        if index >= entries.len() {
            return Err(AssistantError::EntryNotFound(index));
        }
        let removed = entries.remove(index);
        self.store(&entries).await?;
        Ok(removed)
    }
}
