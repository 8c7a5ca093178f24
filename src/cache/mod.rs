//! Generation result caching.
//!
//! Caching avoids redundant external calls for identical requests: a cache
//! hit is only possible for an identical (prompt, model id, max tokens)
//! triple, keyed by a deterministic SHA-256 digest. Entries are serialized
//! results stored through a pluggable [`CacheBackend`] with a fixed
//! one-hour TTL. The client never mutates an entry in place; it only reads
//! or unconditionally overwrites by key, so concurrent callers racing on
//! identical inputs may duplicate work but cannot corrupt cache state.

mod backend;
mod key;

pub use backend::{CacheBackend, MemoryCache, NullCache};
pub use key::CacheKey;

use std::time::Duration;

/// Fixed time-to-live for generation results.
pub const CACHE_TTL: Duration = Duration::from_secs(3600);
