use fd_store::models::Pair;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Separates front and back inside a favourite token.
pub const PAIR_DELIMITER: char = ':';

/// The favourites list presented in the same shape as a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesDeck {
    pub name: String,
    pub language: String,
    pub pairs: Vec<Pair>,
}

impl FavoritesDeck {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self {
            name: "Favorites".to_string(),
            language: "en".to_string(),
            pairs,
        }
    }
}

/// Decode a raw `front:back` path token into a pair.
///
/// The token is split before percent-decoding, so an encoded `%3A` stays part
/// of its half. Anything after a second delimiter is ignored.
pub fn parse_pair_token(token: &str) -> Result<Pair, ApiError> {
    let mut parts = token.split(PAIR_DELIMITER);
    let (Some(front), Some(back)) = (parts.next(), parts.next()) else {
        return Err(ApiError::BadRequest(format!(
            "favorite must be `front{PAIR_DELIMITER}back`"
        )));
    };

    Ok(Pair::new(decode(front)?, decode(back)?))
}

fn decode(part: &str) -> Result<String, ApiError> {
    urlencoding::decode(part)
        .map(|s| s.into_owned())
        .map_err(|_| ApiError::BadRequest("favorite is not valid percent-encoded UTF-8".to_string()))
}
