//! In-memory storage backend.

use async_trait::async_trait;
use dashmap::DashMap;

use super::validate_key;
use crate::error::Result;
use crate::traits::KeyValueStore;

/// Volatile storage backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-existing entries, e.g. to simulate a value
    /// left behind by an earlier session.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.get(key).map(|value| value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();

        assert_eq!(store.get("wishlist").await.unwrap(), None);
        store.set("wishlist", "[1]").await.unwrap();
        assert_eq!(store.get("wishlist").await.unwrap().as_deref(), Some("[1]"));
        assert!(store.remove("wishlist").await.unwrap());
        assert!(!store.remove("wishlist").await.unwrap());
    }

    #[tokio::test]
    async fn test_with_entries() {
        let store = MemoryStore::with_entries([("wishlist", "not-json")]);
        assert_eq!(
            store.get("wishlist").await.unwrap().as_deref(),
            Some("not-json")
        );
    }
}
