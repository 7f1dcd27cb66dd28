//! In-memory session cache for tests and single-process deployments.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::{CacheError, SessionCache};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Process-local [`SessionCache`] over a `RwLock<HashMap>`.
///
/// Expiry is evaluated lazily on read; expired entries are dropped the next
/// time they are touched.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let entries = self
            .entries
            .read()
            .map_err(|_| CacheError::Backend("cache lock poisoned".into()))?;

        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::Backend("cache lock poisoned".into()))?;

        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::Backend("cache lock poisoned".into()))?;

        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_secs)),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::Backend("cache lock poisoned".into()))?;

        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = InMemoryCache::new();

        cache.set("session:1", "refresh-token").await.unwrap();
        assert_eq!(
            cache.get("session:1").await.unwrap().as_deref(),
            Some("refresh-token")
        );

        cache.delete("session:1").await.unwrap();
        assert_eq!(cache.get("session:1").await.unwrap(), None);

        // Deleting an absent key is not an error.
        cache.delete("session:1").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = InMemoryCache::new();

        cache.set("session:1", "old").await.unwrap();
        cache.set("session:1", "new").await.unwrap();

        assert_eq!(cache.get("session:1").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_ttl_entry_expires() {
        let cache = InMemoryCache::new();

        cache.set_with_ttl("deadzone:1", "logout", 1).await.unwrap();
        assert!(cache.get("deadzone:1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(cache.get("deadzone:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ttl_reset_on_repeated_set() {
        let cache = InMemoryCache::new();

        cache.set_with_ttl("deadzone:1", "logout", 1).await.unwrap();
        // Re-setting extends the window.
        cache.set_with_ttl("deadzone:1", "logout", 60).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(cache.get("deadzone:1").await.unwrap().is_some());
    }
}
