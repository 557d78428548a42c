use std::{fmt, marker::PhantomData, sync::Arc, time::Instant};

use metrics::{counter, histogram};
use serde::{Serialize, de::DeserializeOwned};

use crate::{ResourceStore, StoreError};

/// Typed view over one named collection of a [`ResourceStore`].
///
/// Every call is forwarded to the store exactly once; nothing is cached or
/// validated here beyond (de)serializing `T` to and from JSON.
pub struct Resource<T> {
    store: Arc<dyn ResourceStore>,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Resource<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn ResourceStore>, name: &'static str) -> Self {
        Self {
            store,
            name,
            _marker: PhantomData,
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<T>, StoreError> {
        let start = Instant::now();
        let result = self.store.get(self.name, key).await;
        self.record("get", start, &result);

        match result? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn set(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;

        let start = Instant::now();
        let result = self.store.set(self.name, key, value).await;
        self.record("set", start, &result);
        result
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let start = Instant::now();
        let result = self.store.list(self.name).await;
        self.record("list", start, &result);

        result?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(StoreError::from))
            .collect()
    }

    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let start = Instant::now();
        let result = self.store.remove(self.name, key).await;
        self.record("remove", start, &result);
        result
    }

    fn record<R>(&self, op: &'static str, start: Instant, result: &Result<R, StoreError>) {
        let status = match result {
            Ok(_) => "success",
            Err(e) if e.is_not_found() => "not_found",
            Err(e) => {
                tracing::error!(resource = self.name, op, error = %e, "store operation failed");
                "error"
            }
        };

        counter!(
            "store_operations_total",
            "resource" => self.name,
            "op" => op,
            "status" => status
        )
        .increment(1);

        histogram!(
            "store_operation_duration_seconds",
            "resource" => self.name,
            "op" => op
        )
        .record(start.elapsed().as_secs_f64());
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            name: self.name,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, models::Pair};

    #[tokio::test]
    async fn test_resource_is_scoped_to_its_collection() {
        let store: Arc<dyn ResourceStore> = Arc::new(MemoryStore::new());
        let favorites = Resource::<Pair>::new(Arc::clone(&store), "favorites");
        let other = Resource::<Pair>::new(store, "other");

        favorites
            .set("k", &Pair::new("cat", "gato"))
            .await
            .unwrap();

        assert_eq!(favorites.get("k").await.unwrap(), Some(Pair::new("cat", "gato")));
        assert_eq!(other.get("k").await.unwrap(), None);
        assert!(other.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resource_surfaces_shape_mismatch() {
        let store: Arc<dyn ResourceStore> = Arc::new(MemoryStore::new());
        store
            .set("favorites", "k", serde_json::json!({"not": "a pair"}))
            .await
            .unwrap();

        let favorites = Resource::<Pair>::new(store, "favorites");
        let err = favorites.get("k").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
