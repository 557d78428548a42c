use chrono::{DateTime, Utc};
use fd_store::models::{Deck, Pair};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Longest title kept on save, in characters. Longer titles are cut, not rejected.
pub const MAX_TITLE_CHARS: usize = 128;

/// A validated save-deck request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckDraft {
    pub name: String,
    pub title: String,
    pub language: Option<String>,
    pub pairs: Vec<Pair>,
}

impl DeckDraft {
    /// Validate a parsed JSON body.
    ///
    /// `name` must be a non-empty string and `pairs` an array of
    /// `[front, back]` string arrays. `title` and `language` are optional
    /// strings; `null` counts as absent.
    pub fn from_json(value: Value) -> Result<Self, ApiError> {
        let Value::Object(mut fields) = value else {
            return Err(bad_request("body must be a JSON object"));
        };

        let name = match fields.remove("name") {
            Some(Value::String(name)) if !name.is_empty() => name,
            _ => return Err(bad_request("`name` must be a non-empty string")),
        };

        let pairs = match fields.remove("pairs") {
            Some(pairs @ Value::Array(_)) => serde_json::from_value(pairs)
                .map_err(|_| bad_request("`pairs` must contain [front, back] string pairs"))?,
            _ => return Err(bad_request("`pairs` must be an array")),
        };

        let title = optional_string(&mut fields, "title")?.unwrap_or_default();
        let language = optional_string(&mut fields, "language")?;

        Ok(Self {
            name,
            title: title.chars().take(MAX_TITLE_CHARS).collect(),
            language,
            pairs,
        })
    }

    /// Split the draft into the two records that get stored under `uid`.
    pub fn into_records(self, uid: String, created: DateTime<Utc>) -> (Deck, Vec<Pair>) {
        let deck = Deck {
            uid,
            name: self.name,
            title: self.title,
            language: self.language,
            created,
        };
        (deck, self.pairs)
    }
}

fn optional_string(fields: &mut Map<String, Value>, key: &str) -> Result<Option<String>, ApiError> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(bad_request(&format!("`{key}` must be a string"))),
    }
}

fn bad_request(reason: &str) -> ApiError {
    ApiError::BadRequest(reason.to_string())
}

/// A deck together with its pairs, as returned by `GET /deck/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckWithPairs {
    #[serde(flatten)]
    pub deck: Deck,
    pub pairs: Vec<Pair>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_draft() {
        let draft = DeckDraft::from_json(json!({
            "name": "animals",
            "title": "Animals",
            "language": "es",
            "pairs": [["cat", "gato"], ["dog", "perro"]]
        }))
        .unwrap();

        assert_eq!(draft.name, "animals");
        assert_eq!(draft.title, "Animals");
        assert_eq!(draft.language.as_deref(), Some("es"));
        assert_eq!(draft.pairs, vec![Pair::new("cat", "gato"), Pair::new("dog", "perro")]);
    }

    #[test]
    fn test_optional_fields_default() {
        let draft = DeckDraft::from_json(json!({"name": "n", "pairs": []})).unwrap();
        assert_eq!(draft.title, "");
        assert_eq!(draft.language, None);
        assert!(draft.pairs.is_empty());

        let draft =
            DeckDraft::from_json(json!({"name": "n", "title": null, "language": null, "pairs": []}))
                .unwrap();
        assert_eq!(draft.title, "");
        assert_eq!(draft.language, None);
    }

    #[test]
    fn test_title_is_truncated_by_characters() {
        let long = "ñ".repeat(200);
        let draft = DeckDraft::from_json(json!({"name": "n", "title": long, "pairs": []})).unwrap();
        assert_eq!(draft.title.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let invalid = [
            json!(null),
            json!([]),
            json!("animals"),
            json!({"pairs": []}),
            json!({"name": "", "pairs": []}),
            json!({"name": 42, "pairs": []}),
            json!({"name": "n"}),
            json!({"name": "n", "pairs": "cat:gato"}),
            json!({"name": "n", "pairs": [["cat"]]}),
            json!({"name": "n", "pairs": [["cat", 1]]}),
            json!({"name": "n", "pairs": [], "title": 5}),
            json!({"name": "n", "pairs": [], "language": ["es"]}),
        ];

        for body in invalid {
            let result = DeckDraft::from_json(body.clone());
            assert!(
                matches!(result, Err(ApiError::BadRequest(_))),
                "expected 400 for {body}"
            );
        }
    }

    #[test]
    fn test_merged_deck_shape() {
        let created = Utc::now();
        let draft = DeckDraft::from_json(json!({
            "name": "animals",
            "language": "es",
            "pairs": [["cat", "gato"]]
        }))
        .unwrap();
        let (deck, pairs) = draft.into_records("uid".to_string(), created);

        let value = serde_json::to_value(DeckWithPairs { deck, pairs }).unwrap();
        assert_eq!(value["uid"], "uid");
        assert_eq!(value["name"], "animals");
        assert_eq!(value["title"], "");
        assert_eq!(value["language"], "es");
        assert_eq!(value["pairs"], json!([["cat", "gato"]]));
        assert!(value["created"].is_string());
    }
}
