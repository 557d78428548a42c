use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::{deck, error::ApiError, favorites, state::ApiState};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .merge(deck::routes())
        .merge(favorites::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Readiness: the store must answer a ping
async fn ready(State(state): State<ApiState>) -> StatusCode {
    match state.store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "store is not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn handler_404() -> ApiError {
    ApiError::NotFound
}
