mod json_file;
mod memory;

pub use json_file::JsonFileHistory;
pub use memory::MemoryHistory;

use crate::error::AssistantError;
use crate::model::HistoryEntry;
use async_trait::async_trait;

/// Storage for past generations.
///
/// Entries are kept oldest first; the position of an entry in
/// [`HistoryStore::entries`] is the index accepted by `get` and `delete`.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Add one entry after the existing ones
    async fn append(&self, entry: HistoryEntry) -> Result<(), AssistantError>;

    /// All stored entries, oldest first
    async fn entries(&self) -> Result<Vec<HistoryEntry>, AssistantError>;

    async fn get(&self, index: usize) -> Result<HistoryEntry, AssistantError> {
        self.entries()
            .await?
            .into_iter()
            .nth(index)
            .ok_or(AssistantError::EntryNotFound(index))
    }

    /// Permanently remove the entry at `index` and return it
    async fn delete(&self, index: usize) -> Result<HistoryEntry, AssistantError>;
}
