use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{StatusCode, Uri},
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{ApiState, error::ApiError, hash::hash};

use super::model::{FavoritesDeck, parse_pair_token};

/// Create the favorite routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/fav", get(list_favorites))
        .route("/fav/{pair}", post(save_favorite).delete(remove_favorite))
}

/// The `{pair}` segment exactly as sent, still percent-encoded.
///
/// Favourites are keyed on the encoded token, so the decoded `Path` value
/// can't be used here.
fn raw_pair_token(uri: &Uri) -> &str {
    uri.path().rsplit('/').next().unwrap_or_default()
}

async fn list_favorites(State(state): State<ApiState>) -> Result<Json<FavoritesDeck>, ApiError> {
    let pairs = state.favorites().list().await?;
    Ok(Json(FavoritesDeck::new(pairs)))
}

async fn save_favorite(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Value>, ApiError> {
    let token = raw_pair_token(&uri);
    let pair = parse_pair_token(token)?;

    state.favorites().set(&hash(token), &pair).await?;

    Ok(Json(json!({ "ok": true })))
}

async fn remove_favorite(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
) -> Result<StatusCode, ApiError> {
    let token = raw_pair_token(&uri);
    state.favorites().remove(&hash(token)).await?;
    Ok(StatusCode::OK)
}
