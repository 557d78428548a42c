//! In-process backend, used for local development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{ResourceStore, StoreError};

#[derive(Debug)]
struct Entry {
    seq: u64,
    value: Value,
}

#[derive(Debug, Default)]
struct Collections {
    next_seq: u64,
    by_resource: HashMap<String, HashMap<String, Entry>>,
}

/// A [`ResourceStore`] that keeps everything in memory.
///
/// Listing returns documents in first-insertion order; overwriting a key keeps
/// its original position.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn get(&self, resource: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_resource
            .get(resource)
            .and_then(|entries| entries.get(key))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, resource: &str, key: &str, value: Value) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let seq = inner.next_seq;

        let entries = inner.by_resource.entry(resource.to_string()).or_default();
        match entries.get_mut(key) {
            Some(entry) => entry.value = value,
            None => {
                entries.insert(key.to_string(), Entry { seq, value });
                inner.next_seq += 1;
            }
        }

        Ok(())
    }

    async fn list(&self, resource: &str) -> Result<Vec<Value>, StoreError> {
        let inner = self.inner.read().await;
        let Some(entries) = inner.by_resource.get(resource) else {
            return Ok(Vec::new());
        };

        let mut ordered: Vec<&Entry> = entries.values().collect();
        ordered.sort_by_key(|entry| entry.seq);
        Ok(ordered.into_iter().map(|entry| entry.value.clone()).collect())
    }

    async fn remove(&self, resource: &str, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(entries) = inner.by_resource.get_mut(resource) {
            entries.remove(key);
        }
        Ok(())
    }
}
