use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fd_store::StoreError;
use hyper::ext::ReasonPhrase;
use thiserror::Error;

use crate::body::BodyError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found")]
    NotFound,
    #[error("Deck already exists")]
    Conflict,
    #[error(transparent)]
    Body(#[from] BodyError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Body(BodyError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Body(BodyError::Stream(_)) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Status line text for the errors clients are expected to handle.
    fn reason(&self) -> Option<&'static [u8]> {
        match self {
            Self::BadRequest(_) => Some(b"Bad request".as_slice()),
            Self::NotFound => Some(b"Not found".as_slice()),
            Self::Conflict => Some(b"Exists".as_slice()),
            Self::Body(_) | Self::Store(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let mut response = status.into_response();
        if let Some(reason) = self.reason() {
            response
                .extensions_mut()
                .insert(ReasonPhrase::from_static(reason));
        }

        response
    }
}
