// src/core/storage.rs
//! Persistent key-value storage seam used by the profile store and the
//! recommendation cache

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key holding the serialized user profile.
pub const PROFILE_KEY: &str = "userProfile";

/// Key holding the last successful recommendation list.
pub const RECOMMENDED_JOBS_KEY: &str = "recommendedJobs";

/// Whole-value key-value store with last-write-wins semantics.
///
/// `set` must replace the stored value atomically: readers observe either the
/// previous value or the new one, never a mix.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;

    /// When `key` was last written, if the backend tracks it.
    async fn updated_at(&self, _key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(None)
    }
}

/// In-process store, mostly for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, (String, DateTime<Utc>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), (value.to_string(), Utc::now()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).map(|(_, at)| *at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
        assert!(store.updated_at("k").await.unwrap().is_some());

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert_eq!(store.updated_at("k").await.unwrap(), None);
    }
}
