//! In-process stand-in for the external key/queue store.
//!
//! Values, lists and sets live under the string keys produced by
//! [`bmon_core::keys`]; payloads are stored as JSON text the same way the
//! external store holds them. Nothing here is persisted.

mod brands;
mod mentions;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

pub use brands::{create_brand, delete_brand, get_brand, list_brands, seed_brands, BrandWriteError};
pub use mentions::{latest_analysis, list_mentions, push_mentions};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode or decode JSON at {key}: {source}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    lists: HashMap<String, Vec<String>>,
    sets: HashMap<String, BTreeSet<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.read().await.values.get(key).cloned()
    }

    /// Plain value write. Analysis results reach the store from outside
    /// this service, so only tests write values directly.
    #[cfg(test)]
    pub async fn set(&self, key: &str, value: String) {
        self.inner
            .write()
            .await
            .values
            .insert(key.to_string(), value);
    }

    /// Removes a value, list or set stored at `key`. Returns whether anything
    /// was removed.
    #[cfg(test)]
    pub async fn delete(&self, key: &str) -> bool {
        let mut inner = self.inner.write().await;
        let value = inner.values.remove(key).is_some();
        let list = inner.lists.remove(key).is_some();
        let set = inner.sets.remove(key).is_some();
        value || list || set
    }

    /// Appends `values` to the list at `key`, returning the new length.
    pub async fn push(&self, key: &str, values: impl IntoIterator<Item = String>) -> usize {
        let mut inner = self.inner.write().await;
        let list = inner.lists.entry(key.to_string()).or_default();
        list.extend(values);
        list.len()
    }

    /// Returns up to `limit` of the newest list entries, oldest first.
    pub async fn tail(&self, key: &str, limit: usize) -> Vec<String> {
        let inner = self.inner.read().await;
        inner.lists.get(key).map_or_else(Vec::new, |list| {
            let start = list.len().saturating_sub(limit);
            list[start..].to_vec()
        })
    }

    pub async fn list_len(&self, key: &str) -> usize {
        self.inner.read().await.lists.get(key).map_or(0, Vec::len)
    }

    /// Adds `member` to the set at `set_key` and writes `value` at
    /// `value_key` under one write guard. Returns `false` and writes nothing
    /// if the member was already present.
    pub async fn add_member_with_value(
        &self,
        set_key: &str,
        member: &str,
        value_key: &str,
        value: String,
    ) -> bool {
        let mut inner = self.inner.write().await;
        let added = inner
            .sets
            .entry(set_key.to_string())
            .or_default()
            .insert(member.to_string());
        if added {
            inner.values.insert(value_key.to_string(), value);
        }
        added
    }

    /// Removes `member` from the set at `set_key` and the value at
    /// `value_key` under one write guard. Returns whether each existed.
    pub async fn remove_member_with_value(
        &self,
        set_key: &str,
        member: &str,
        value_key: &str,
    ) -> (bool, bool) {
        let mut inner = self.inner.write().await;
        let removed = inner
            .sets
            .get_mut(set_key)
            .is_some_and(|set| set.remove(member));
        let had_value = inner.values.remove(value_key).is_some();
        (removed, had_value)
    }

    /// Set members in sorted order.
    pub async fn members(&self, key: &str) -> Vec<String> {
        self.inner
            .read()
            .await
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

fn encode<T: serde::Serialize>(key: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|source| StoreError::Codec {
        key: key.to_string(),
        source,
    })
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Codec {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_set_get_delete() {
        let store = MemoryStore::new();
        assert!(store.get("k").await.is_none());
        store.set("k", "v".to_string()).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v"));
        assert!(store.delete("k").await);
        assert!(!store.delete("k").await);
    }

    #[tokio::test]
    async fn tail_returns_newest_oldest_first() {
        let store = MemoryStore::new();
        let len = store
            .push("q", ["a", "b", "c"].map(String::from))
            .await;
        assert_eq!(len, 3);
        assert_eq!(store.tail("q", 2).await, vec!["b", "c"]);
        assert_eq!(store.tail("q", 10).await, vec!["a", "b", "c"]);
        assert!(store.tail("missing", 5).await.is_empty());
        assert_eq!(store.list_len("q").await, 3);
    }

    #[tokio::test]
    async fn set_membership_is_unique_and_sorted() {
        let store = MemoryStore::new();
        assert!(store.add_member_with_value("s", "globex", "v:globex", "g".into()).await);
        assert!(store.add_member_with_value("s", "acme", "v:acme", "a".into()).await);
        assert!(!store.add_member_with_value("s", "acme", "v:acme", "other".into()).await);
        assert_eq!(store.members("s").await, vec!["acme", "globex"]);
        assert_eq!(store.get("v:acme").await.as_deref(), Some("a"));

        assert_eq!(
            store.remove_member_with_value("s", "acme", "v:acme").await,
            (true, true)
        );
        assert_eq!(
            store.remove_member_with_value("s", "acme", "v:acme").await,
            (false, false)
        );
        assert_eq!(
            store.remove_member_with_value("missing", "acme", "v:acme").await,
            (false, false)
        );
        assert_eq!(store.members("s").await, vec!["globex"]);
    }

    #[test]
    fn decode_reports_key_on_failure() {
        let err = decode::<serde_json::Value>("brand:x:meta", "{not json").unwrap_err();
        assert!(err.to_string().contains("brand:x:meta"));
    }
}
