use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use fd_api::{config::ApiConfig, router, state::ApiState};
use fd_store::{MemoryStore, ResourceStore, StoreError};
use http_body_util::BodyExt;
use hyper::ext::ReasonPhrase;
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;

/// Test state builder backed by an in-memory store unless told otherwise
pub struct TestStateBuilder {
    store: Arc<dyn ResourceStore>,
    max_body_bytes: Option<usize>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            max_body_bytes: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn ResourceStore>) -> Self {
        self.store = store;
        self
    }

    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    pub fn build(self) -> ApiState {
        let mut vars = vec![("STORE_ID".to_string(), "test".to_string())];
        if let Some(limit) = self.max_body_bytes {
            vars.push(("MAX_BODY_BYTES".to_string(), limit.to_string()));
        }

        let config = ApiConfig::from_vars(vars).expect("Failed to build test config");
        ApiState::new(&config, self.store)
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a client around the full API router
pub fn client(state: &ApiState) -> TestClient {
    TestClient::new(router::router().with_state(state.clone()))
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned());
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            reason,
            body,
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Body) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .expect("Failed to build request");

        self.request(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, Body::empty()).await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send("POST", uri, Body::empty()).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, Body::empty()).await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> TestResponse {
        self.send("POST", uri, body.into()).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send("PUT", uri, Body::from(body.to_string())).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    /// Assert status, custom reason phrase and an empty body
    pub fn assert_rejected(&self, expected: StatusCode, reason: &str) {
        self.assert_status(expected);
        assert_eq!(self.reason.as_deref(), Some(reason));
        assert!(self.body.is_empty(), "Expected empty body, got {}", self.text());
    }
}

/// Stores standing in for misbehaving backends
pub mod stores {
    use super::*;

    /// Reports missing keys as `StoreError::NotFound` instead of `Ok(None)`.
    #[derive(Default)]
    pub struct MissAsErrorStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl ResourceStore for MissAsErrorStore {
        async fn get(&self, resource: &str, key: &str) -> Result<Option<Value>, StoreError> {
            match self.inner.get(resource, key).await? {
                Some(value) => Ok(Some(value)),
                None => Err(StoreError::not_found(resource, key)),
            }
        }

        async fn set(&self, resource: &str, key: &str, value: Value) -> Result<(), StoreError> {
            self.inner.set(resource, key, value).await
        }

        async fn list(&self, resource: &str) -> Result<Vec<Value>, StoreError> {
            self.inner.list(resource).await
        }

        async fn remove(&self, resource: &str, key: &str) -> Result<(), StoreError> {
            self.inner.remove(resource, key).await
        }
    }

    /// Fails every operation touching `broken`, and every ping.
    pub struct BrokenResourceStore {
        pub inner: MemoryStore,
        pub broken: &'static str,
    }

    impl BrokenResourceStore {
        pub fn new(broken: &'static str) -> Self {
            Self {
                inner: MemoryStore::new(),
                broken,
            }
        }

        fn check(&self, resource: &str) -> Result<(), StoreError> {
            if resource == self.broken {
                return Err(StoreError::Backend(format!("{resource} is unavailable")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ResourceStore for BrokenResourceStore {
        async fn get(&self, resource: &str, key: &str) -> Result<Option<Value>, StoreError> {
            self.check(resource)?;
            self.inner.get(resource, key).await
        }

        async fn set(&self, resource: &str, key: &str, value: Value) -> Result<(), StoreError> {
            self.check(resource)?;
            self.inner.set(resource, key, value).await
        }

        async fn list(&self, resource: &str) -> Result<Vec<Value>, StoreError> {
            self.check(resource)?;
            self.inner.list(resource).await
        }

        async fn remove(&self, resource: &str, key: &str) -> Result<(), StoreError> {
            self.check(resource)?;
            self.inner.remove(resource, key).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Backend("ping failed".to_string()))
        }
    }
}
