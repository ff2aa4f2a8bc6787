use super::HistoryStore;
use crate::error::AssistantError;
use crate::model::HistoryEntry;
use async_trait::async_trait;
use std::sync::Mutex;

/// History kept in process memory, for tests and `--no-history` runs.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<HistoryEntry>>, AssistantError> {
        self.entries
            .lock()
            .map_err(|_| AssistantError::PersistenceFailed("history lock poisoned".to_string()))
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(&self, entry: HistoryEntry) -> Result<(), AssistantError> {
        self.lock()?.push(entry);
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<HistoryEntry>, AssistantError> {
        Ok(self.lock()?.clone())
    }

    async fn delete(&self, index: usize) -> Result<HistoryEntry, AssistantError> {
        let mut entries = self.lock()?;
        if index >= entries.len() {
            return Err(AssistantError::EntryNotFound(index));
        }
        Ok(entries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroceryList, Recipe};

    fn entry(title: &str) -> HistoryEntry {
        HistoryEntry {
            timestamp: "2024-05-01 18:30:00".to_string(),
            title: title.to_string(),
            ingredients_used: "eggs".to_string(),
            dietary_preferences: "None".to_string(),
            cuisine: None,
            recipe: Recipe {
                title: title.to_string(),
                ..Default::default()
            },
            grocery_list: GroceryList::default(),
        }
    }

    #[tokio::test]
    async fn test_append_get_delete() {
        let history = MemoryHistory::new();
        history.append(entry("Omelette")).await.unwrap();
        history.append(entry("Frittata")).await.unwrap();

        assert_eq!(history.get(1).await.unwrap().title, "Frittata");

        let removed = history.delete(0).await.unwrap();
        assert_eq!(removed.title, "Omelette");

        let remaining = history.entries().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Frittata");
    }

    #[tokio::test]
    async fn test_missing_index() {
        let history = MemoryHistory::new();
        assert!(matches!(
            history.get(0).await,
            Err(AssistantError::EntryNotFound(0))
        ));
        assert!(matches!(
            history.delete(3).await,
            Err(AssistantError::EntryNotFound(3))
        ));
    }
}
