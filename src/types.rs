//! Core request/result types for the generation client.

use crate::config::ModelClass;
use serde::{Deserialize, Serialize};

/// Parameters for a single generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model_class: ModelClass,
    pub max_tokens: u32,
    pub use_cache: bool,
    pub max_retries: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_class: ModelClass::Fast,
            max_tokens: 600,
            use_cache: true,
            max_retries: 3,
        }
    }

    pub fn model_class(mut self, class: ModelClass) -> Self {
        self.model_class = class;
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// Outcome of a successful generation.
///
/// Serializable so cached entries round-trip byte-identically: a cache hit
/// returns the stored result unmodified apart from the `from_cache` flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    /// Generated text, guaranteed non-empty.
    pub text: String,
    /// Resolved external model identifier.
    pub model_id: String,
    /// Logical tier the caller selected.
    pub model_class: ModelClass,
    /// Wall-clock time of the successful invocation only, in milliseconds.
    /// Cache lookups and backoff waits are excluded.
    pub duration_ms: u64,
    /// Whitespace-delimited word count of the prompt.
    pub prompt_tokens: u32,
    /// Whitespace-delimited word count of the generated text.
    pub generated_tokens: u32,
    /// Whether this result was served from cache.
    pub from_cache: bool,
    /// 1-based invocation attempt that succeeded.
    pub attempt: u32,
}

/// Liveness probe outcome from [`crate::client::GenerationClient::test_connection`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub model_id: String,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Approximate a token count by whitespace-delimited word splitting.
///
/// This mirrors the accounting the rest of the application reports. It is an
/// approximation, not a real tokenizer count, and is kept as the documented
/// behavior.
pub fn approx_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}
