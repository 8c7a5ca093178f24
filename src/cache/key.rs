//! Cache key derivation.

use sha2::{Digest, Sha256};

/// Deterministic digest over (prompt, resolved model id, max tokens).
///
/// The three inputs are length-prefixed before hashing so that distinct
/// triples can never collide through concatenation ambiguity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    hash: String,
}

impl CacheKey {
    pub fn derive(prompt: &str, model_id: &str, max_tokens: u32) -> Self {
        let mut hasher = Sha256::new();
        for part in [prompt, model_id] {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part.as_bytes());
        }
        hasher.update(max_tokens.to_be_bytes());
        let hash: String = hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect();
        Self {
            hash: format!("copygen:{}", hash),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        let a = CacheKey::derive("Buat deskripsi produk", "amazon.nova-lite-v1:0", 600);
        let b = CacheKey::derive("Buat deskripsi produk", "amazon.nova-lite-v1:0", 600);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_varies_with_each_input() {
        let base = CacheKey::derive("prompt", "model", 100);
        assert_ne!(base, CacheKey::derive("prompt!", "model", 100));
        assert_ne!(base, CacheKey::derive("prompt", "model-2", 100));
        assert_ne!(base, CacheKey::derive("prompt", "model", 200));
    }

    #[test]
    fn test_no_concatenation_collision() {
        // ("ab", "c") and ("a", "bc") must hash differently.
        let a = CacheKey::derive("ab", "c", 1);
        let b = CacheKey::derive("a", "bc", 1);
        assert_ne!(a, b);
    }
}
