use crate::domain::ports::KeyValueStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory key-value store.
///
/// Uses `Arc<RwLock<HashMap<String, String>>>`, so clones share the same
/// entries. Nothing survives the process; meant for tests and throwaway runs.
#[derive(Default, Clone)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn set_all(&self, new_entries: Vec<(&str, String)>) -> Result<()> {
        let mut entries = self.entries.write().await;
        for (key, value) in new_entries {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
