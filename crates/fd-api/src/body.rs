//! Request body collection.

use axum::body::{Body, Bytes};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BodyError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("failed to read request body: {0}")]
    Stream(String),
}

/// Buffer the whole body, failing once more than `limit` bytes have arrived.
///
/// Errors raised by the underlying stream are returned as [`BodyError::Stream`].
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, BodyError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(BodyError::TooLarge { limit }),
        Err(e) => Err(BodyError::Stream(e.to_string())),
    }
}

/// Parse a buffered body as JSON. Anything that is not valid UTF-8 JSON yields `None`.
pub fn read_json(bytes: &[u8]) -> Option<Value> {
    let text = std::str::from_utf8(bytes).ok()?;
    serde_json::from_str(text).ok()
}
