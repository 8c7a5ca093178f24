//! Generation client: cache-aware, retry-bounded model invocation.

mod builder;
mod core;
mod policy;

pub use builder::GenerationClientBuilder;
pub use core::GenerationClient;
