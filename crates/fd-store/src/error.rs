use thiserror::Error;

/// Failures reported by a [`ResourceStore`](crate::ResourceStore).
///
/// `NotFound` is kept apart from the other variants so callers can decide to
/// treat a missing key as absence without also hiding real backend failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{resource}/{key} not found")]
    NotFound { resource: String, key: String },
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(resource: &str, key: &str) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            key: key.to_string(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
