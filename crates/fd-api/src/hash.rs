use sha2::{Digest, Sha256};

/// Derive a storage key from a user supplied string.
///
/// SHA-256, hex encoded (64 lowercase characters). The input is hashed as
/// given: callers pass the canonical form they want to key on.
pub fn hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
