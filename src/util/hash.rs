//! Blind-index hashing for searchable PII columns.
//!
//! Emails are stored alongside a keyed HMAC-SHA256 digest; lookups go through
//! the digest so the plain address never appears in a WHERE clause or an
//! index. Input is lowercased and trimmed first so lookups are
//! case-insensitive.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Strategy producing the blind-index hash for an email address.
pub trait EmailHashStrategy: Send + Sync {
    fn hash(&self, email: &str) -> String;
}

/// Production strategy: keyed HMAC-SHA256, hex encoded.
pub struct HmacHashStrategy {
    key: Vec<u8>,
}

impl HmacHashStrategy {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }
}

impl EmailHashStrategy for HmacHashStrategy {
    fn hash(&self, email: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(normalize(email).as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

/// Test strategy: the normalized address itself, readable in fixtures.
pub struct TestHashStrategy;

impl EmailHashStrategy for TestHashStrategy {
    fn hash(&self, email: &str) -> String {
        normalize(email)
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_case_insensitive() {
        let strategy = HmacHashStrategy::new(b"test-key".to_vec());

        let a = strategy.hash("Jane@Example.com");
        let b = strategy.hash("  jane@example.com ");

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn different_keys_produce_different_hashes() {
        let a = HmacHashStrategy::new(b"key-a".to_vec()).hash("jane@example.com");
        let b = HmacHashStrategy::new(b"key-b".to_vec()).hash("jane@example.com");

        assert_ne!(a, b);
    }

    #[test]
    fn test_strategy_is_transparent() {
        assert_eq!(
            TestHashStrategy.hash("Jane@Example.com"),
            "jane@example.com"
        );
    }
}
