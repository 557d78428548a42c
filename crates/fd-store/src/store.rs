use async_trait::async_trait;
use serde_json::Value;

use crate::StoreError;

/// Key/value contract every backend implements.
///
/// Values are opaque JSON documents grouped into named collections
/// ("resources"). Implementations must be safe to share between concurrent
/// requests; no cross-key atomicity is provided.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under the key.
    /// * `Ok(Some(value))` - The stored document.
    /// * `Err(StoreError::NotFound)` - Backends that report misses as errors may return this instead of `Ok(None)`.
    async fn get(&self, resource: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous document.
    async fn set(&self, resource: &str, key: &str, value: Value) -> Result<(), StoreError>;

    /// All documents of a collection, oldest first. Empty when nothing was stored.
    async fn list(&self, resource: &str) -> Result<Vec<Value>, StoreError>;

    /// Delete the value under `key`. Removing a missing key is not an error.
    async fn remove(&self, resource: &str, key: &str) -> Result<(), StoreError>;

    /// Cheap connectivity check used by `/health/ready`.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
