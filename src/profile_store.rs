// src/profile_store.rs
//! In-memory profile mirrored to the key-value store on every mutation

use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::app_log;
use crate::core::{KeyValueStore, PROFILE_KEY};
use crate::error::{JobMatchError, JobMatchResult};
use crate::types::Profile;

pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<Profile>,
    // Serializes read-modify-write cycles.
    update_lock: Mutex<()>,
}

impl ProfileStore {
    /// Load the persisted profile. Missing, unreadable or corrupt data all
    /// yield the default empty profile.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let profile = Self::read_persisted(store.as_ref()).await;
        let (state, _) = watch::channel(profile);
        Self {
            store,
            state,
            update_lock: Mutex::new(()),
        }
    }

    async fn read_persisted(store: &dyn KeyValueStore) -> Profile {
        let raw = match store.get(PROFILE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Profile::default(),
            Err(e) => {
                app_log!(warn, "Failed to read stored profile, using defaults: {:#}", e);
                return Profile::default();
            }
        };

        match serde_json::from_str::<Profile>(&raw) {
            Ok(mut profile) => {
                profile.dedup_skills();
                profile
            }
            Err(e) => {
                app_log!(warn, "Ignoring corrupt stored profile: {}", e);
                Profile::default()
            }
        }
    }

    pub fn current(&self) -> Profile {
        self.state.borrow().clone()
    }

    pub fn is_complete(&self) -> bool {
        self.state.borrow().is_complete()
    }

    /// Receives every committed profile.
    pub fn subscribe(&self) -> watch::Receiver<Profile> {
        self.state.subscribe()
    }

    /// Apply `mutator` to a copy of the profile, persist the whole result,
    /// then commit it and notify subscribers.
    ///
    /// If the write fails the in-memory profile is left unchanged.
    pub async fn update<F>(&self, mutator: F) -> JobMatchResult<Profile>
    where
        F: FnOnce(&mut Profile),
    {
        let _guard = self.update_lock.lock().await;

        let mut next = self.current();
        mutator(&mut next);

        self.persist(&next).await?;
        self.state.send_replace(next.clone());
        Ok(next)
    }

    /// Replace the whole profile, e.g. with one parsed from a résumé.
    pub async fn replace(&self, profile: Profile) -> JobMatchResult<Profile> {
        self.update(move |current| *current = profile).await
    }

    /// Reset to the empty default profile.
    pub async fn clear(&self) -> JobMatchResult<Profile> {
        self.update(|current| *current = Profile::default()).await
    }

    async fn persist(&self, profile: &Profile) -> JobMatchResult<()> {
        let serialized = serde_json::to_string(profile)
            .map_err(|e| JobMatchError::Storage(anyhow::Error::new(e)))?;

        self.store
            .set(PROFILE_KEY, &serialized)
            .await
            .map_err(JobMatchError::Storage)?;

        app_log!(debug, "Persisted profile ({} bytes)", serialized.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    #[tokio::test]
    async fn test_load_defaults_when_absent() {
        let profiles = ProfileStore::load(Arc::new(MemoryStore::new())).await;
        assert_eq!(profiles.current(), Profile::default());
        assert!(!profiles.is_complete());
    }

    #[tokio::test]
    async fn test_corrupt_profile_loads_as_default() {
        let store = Arc::new(MemoryStore::new());
        store.set(PROFILE_KEY, "{\"fullName\": oops").await.unwrap();

        let profiles = ProfileStore::load(store).await;
        assert_eq!(profiles.current(), Profile::default());
    }

    #[tokio::test]
    async fn test_every_update_persists_whole_profile() {
        let store = Arc::new(MemoryStore::new());
        let profiles = ProfileStore::load(store.clone()).await;

        profiles
            .update(|p| p.full_name = "A".to_string())
            .await
            .unwrap();
        profiles
            .update(|p| p.email = "a@b.com".to_string())
            .await
            .unwrap();
        profiles.update(|p| {
            p.add_skill("x");
        })
        .await
        .unwrap();

        assert!(profiles.is_complete());

        let raw = store.get(PROFILE_KEY).await.unwrap().unwrap();
        let persisted: Profile = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, profiles.current());

        let reloaded = ProfileStore::load(store).await;
        assert!(reloaded.is_complete());
        assert_eq!(reloaded.current().skills, vec!["x"]);
    }

    #[tokio::test]
    async fn test_removing_last_skill_flips_completeness() {
        let profiles = ProfileStore::load(Arc::new(MemoryStore::new())).await;
        profiles
            .update(|p| {
                p.full_name = "A".to_string();
                p.email = "a@b.com".to_string();
                p.add_skill("x");
            })
            .await
            .unwrap();
        assert!(profiles.is_complete());

        profiles
            .update(|p| {
                p.remove_skill("x");
            })
            .await
            .unwrap();
        assert!(!profiles.is_complete());
    }

    #[tokio::test]
    async fn test_subscribers_see_committed_changes() {
        let profiles = ProfileStore::load(Arc::new(MemoryStore::new())).await;
        let mut rx = profiles.subscribe();

        profiles
            .update(|p| p.career_goals = "Ship things".to_string())
            .await
            .unwrap();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().career_goals, "Ship things");
    }

    #[tokio::test]
    async fn test_clear_resets_and_persists_defaults() {
        let store = Arc::new(MemoryStore::new());
        let profiles = ProfileStore::load(store.clone()).await;
        profiles
            .update(|p| p.full_name = "A".to_string())
            .await
            .unwrap();

        profiles.clear().await.unwrap();

        assert_eq!(profiles.current(), Profile::default());
        let reloaded = ProfileStore::load(store).await;
        assert_eq!(reloaded.current(), Profile::default());
    }

    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            anyhow::bail!("disk unavailable")
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("disk full")
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }

        async fn updated_at(&self, _key: &str) -> Result<Option<DateTime<Utc>>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_profile_unchanged() {
        let profiles = ProfileStore::load(Arc::new(FailingStore)).await;

        let result = profiles
            .update(|p| p.full_name = "A".to_string())
            .await;

        assert!(matches!(result, Err(JobMatchError::Storage(_))));
        assert_eq!(profiles.current().full_name, "");
    }
}
