use std::sync::Arc;

use fd_store::{
    DECK, DECK_PAIRS, FAVORITES, Resource, ResourceStore,
    models::{Deck, DeckPairs, Pair},
};

use crate::config::ApiConfig;

/// Shared handler state: the one store handle plus request limits.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn ResourceStore>,
    pub max_body_bytes: usize,
}

impl ApiState {
    pub fn new(config: &ApiConfig, store: Arc<dyn ResourceStore>) -> Self {
        Self {
            store,
            max_body_bytes: config.max_body_bytes,
        }
    }

    pub fn decks(&self) -> Resource<Deck> {
        Resource::new(Arc::clone(&self.store), DECK)
    }

    pub fn deck_pairs(&self) -> Resource<DeckPairs> {
        Resource::new(Arc::clone(&self.store), DECK_PAIRS)
    }

    pub fn favorites(&self) -> Resource<Pair> {
        Resource::new(Arc::clone(&self.store), FAVORITES)
    }
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("max_body_bytes", &self.max_body_bytes)
            .finish_non_exhaustive()
    }
}
