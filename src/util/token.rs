//! Selector/verifier split tokens for password resets and email changes.
//!
//! The raw token handed to the user is `{selector}{verifier}`. Only the
//! selector is stored in clear for lookup; the verifier is stored as a
//! SHA-256 digest, so a leaked token table cannot be replayed.

use rand::{distr::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

const SELECTOR_LENGTH: usize = 16;
const VERIFIER_LENGTH: usize = 32;

/// Freshly generated token with its storable parts.
pub struct GeneratedToken {
    /// Raw token to hand to the user, never stored.
    pub token: String,
    pub selector: String,
    pub verifier_hash: String,
}

pub fn generate() -> GeneratedToken {
    let selector = random_string(SELECTOR_LENGTH);
    let verifier = random_string(VERIFIER_LENGTH);

    GeneratedToken {
        token: format!("{selector}{verifier}"),
        verifier_hash: hash_verifier(&verifier),
        selector,
    }
}

/// Splits a raw token back into selector and verifier. `None` when the
/// token has the wrong shape.
pub fn split(token: &str) -> Option<(&str, &str)> {
    if token.len() != SELECTOR_LENGTH + VERIFIER_LENGTH || !token.is_ascii() {
        return None;
    }

    Some(token.split_at(SELECTOR_LENGTH))
}

pub fn hash_verifier(verifier: &str) -> String {
    hex::encode(Sha256::digest(verifier.as_bytes()))
}

pub fn verifier_matches(verifier: &str, stored_hash: &str) -> bool {
    hash_verifier(verifier) == stored_hash
}

fn random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_splits_back_into_parts() {
        let generated = generate();

        let (selector, verifier) = split(&generated.token).unwrap();

        assert_eq!(selector, generated.selector);
        assert!(verifier_matches(verifier, &generated.verifier_hash));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(split("short").is_none());
        assert!(split(&"x".repeat(SELECTOR_LENGTH + VERIFIER_LENGTH + 1)).is_none());
    }

    #[test]
    fn wrong_verifier_does_not_match() {
        let generated = generate();

        assert!(!verifier_matches("not-the-verifier", &generated.verifier_hash));
    }
}
