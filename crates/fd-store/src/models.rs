use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One flashcard, serialized as a two-element `[front, back]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair(pub String, pub String);

impl Pair {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self(front.into(), back.into())
    }

    pub fn front(&self) -> &str {
        &self.0
    }

    pub fn back(&self) -> &str {
        &self.1
    }
}

/// Deck metadata, stored in the `deck` collection under `uid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub created: DateTime<Utc>,
}

/// The pairs of a deck, stored in the `deckpairs` collection under the deck's `uid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPairs {
    pub pairs: Vec<Pair>,
}
