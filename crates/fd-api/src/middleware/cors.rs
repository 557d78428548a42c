use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS for the deck and favourite endpoints.
///
/// With no configured origins every origin is accepted; otherwise only the
/// listed ones (entries that are not valid header values are skipped).
pub fn create_cors_layer(allowed_origins: Option<Vec<String>>) -> CorsLayer {
    let Some(allowed_origins) = allowed_origins else {
        return CorsLayer::very_permissive();
    };

    let origins = allowed_origins
        .into_iter()
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
