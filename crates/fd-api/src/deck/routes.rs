use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State, rejection::PathRejection},
    routing::get,
};
use chrono::Utc;
use fd_store::{
    DECK_PAIRS, StoreError,
    models::{Deck, DeckPairs},
};
use serde_json::{Value, json};

use crate::{
    ApiState,
    body::{read_body, read_json},
    error::ApiError,
    hash::hash,
};

use super::model::{DeckDraft, DeckWithPairs};

/// Create the deck routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/deck",
            get(list_decks).post(create_deck).put(overwrite_deck),
        )
        .route("/deck/{name}", get(load_deck))
}

/// Whether saving over an existing deck is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveMode {
    Create,
    Overwrite,
}

/// Load a deck by name, with its pairs merged in
async fn load_deck(
    State(state): State<ApiState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<DeckWithPairs>, ApiError> {
    // A name that doesn't decode to UTF-8 can never have been saved.
    let Ok(Path(name)) = name else {
        return Err(ApiError::NotFound);
    };
    let uid = hash(&name);

    let Some(deck) = state.decks().get(&uid).await? else {
        return Err(ApiError::NotFound);
    };

    // A deck without its pairs record is a half-written save, not an empty deck.
    let DeckPairs { pairs } = state
        .deck_pairs()
        .get(&uid)
        .await?
        .ok_or_else(|| StoreError::not_found(DECK_PAIRS, &uid))?;

    Ok(Json(DeckWithPairs { deck, pairs }))
}

/// List the metadata of every stored deck
async fn list_decks(State(state): State<ApiState>) -> Result<Json<Vec<Deck>>, ApiError> {
    let decks = state.decks().list().await?;
    Ok(Json(decks))
}

/// Save a new deck, refusing to replace an existing one
async fn create_deck(State(state): State<ApiState>, body: Body) -> Result<Json<Value>, ApiError> {
    save_deck(&state, body, SaveMode::Create).await
}

/// Save a deck, replacing any existing deck with the same name
async fn overwrite_deck(
    State(state): State<ApiState>,
    body: Body,
) -> Result<Json<Value>, ApiError> {
    save_deck(&state, body, SaveMode::Overwrite).await
}

async fn save_deck(state: &ApiState, body: Body, mode: SaveMode) -> Result<Json<Value>, ApiError> {
    let bytes = read_body(body, state.max_body_bytes).await?;
    let value = read_json(&bytes)
        .ok_or_else(|| ApiError::BadRequest("body is not valid JSON".to_string()))?;
    let draft = DeckDraft::from_json(value)?;

    let uid = hash(&draft.name);
    let decks = state.decks();

    // Backends that report a missing key as an error mean "no deck yet".
    let existing = match decks.get(&uid).await {
        Ok(deck) => deck,
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };

    if existing.is_some() && mode == SaveMode::Create {
        tracing::info!(uid = %uid, "deck already exists");
        return Err(ApiError::Conflict);
    }

    let (deck, pairs) = draft.into_records(uid, Utc::now());

    // Two independent writes: a failure on the second leaves the deck without pairs,
    // which load_deck reports as a lookup failure.
    decks.set(&deck.uid, &deck).await?;
    state.deck_pairs().set(&deck.uid, &DeckPairs { pairs }).await?;

    let overwrite = mode == SaveMode::Overwrite;
    tracing::info!(uid = %deck.uid, name = %deck.name, overwrite, "deck saved");

    Ok(Json(json!({ "ok": true })))
}
