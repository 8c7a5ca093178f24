use std::sync::Arc;

use crate::cache::{CacheBackend, MemoryCache};
use crate::config::ClientConfig;
use crate::transport::{HttpInvoker, ModelInvoker};
use crate::usage::{noop_sink, UsageSink};
use crate::Result;

use super::core::GenerationClient;

/// Builder for [`GenerationClient`].
///
/// Keep this surface small: configuration is required, every collaborator has
/// a sensible default, and transport construction failures surface here
/// rather than on first use.
pub struct GenerationClientBuilder {
    config: Option<ClientConfig>,
    cache: Option<Arc<dyn CacheBackend>>,
    usage: Option<Arc<dyn UsageSink>>,
    invoker: Option<Arc<dyn ModelInvoker>>,
}

impl GenerationClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            cache: None,
            usage: None,
            invoker: None,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default in-memory cache backend.
    pub fn cache(mut self, cache: Arc<dyn CacheBackend>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Inject a usage sink. Default is a no-op sink.
    pub fn usage_sink(mut self, sink: Arc<dyn UsageSink>) -> Self {
        self.usage = Some(sink);
        self
    }

    /// Replace the HTTP transport, primarily for tests.
    pub fn invoker(mut self, invoker: Arc<dyn ModelInvoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    pub fn build(self) -> Result<GenerationClient> {
        let config = self
            .config
            .ok_or_else(|| crate::Error::configuration("client configuration is required"))?;
        let invoker = match self.invoker {
            Some(invoker) => invoker,
            None => Arc::new(HttpInvoker::new(&config)?),
        };
        Ok(GenerationClient {
            invoker,
            cache: self.cache.unwrap_or_else(|| Arc::new(MemoryCache::new(1024))),
            usage: self.usage.unwrap_or_else(noop_sink),
            config,
        })
    }
}

impl Default for GenerationClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_config() {
        assert!(GenerationClientBuilder::new().build().is_err());
    }

    #[test]
    fn test_build_fails_on_invalid_endpoint() {
        let result = GenerationClientBuilder::new()
            .config(ClientConfig::new("not a url"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_with_valid_endpoint() {
        let client = GenerationClientBuilder::new()
            .config(ClientConfig::new("https://bedrock.example.com").with_api_key("k"))
            .build()
            .unwrap();
        assert_eq!(client.resolve_model(crate::config::ModelClass::Fast), "amazon.nova-lite-v1:0");
    }
}
