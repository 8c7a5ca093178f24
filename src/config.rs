//! Client configuration: model-class mapping and endpoint settings.
//!
//! Configuration is an explicit value injected at construction, never read
//! from ambient global state. The model map carries the three logical tiers
//! the surrounding application exposes and their concrete model identifiers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Logical model tier selected by callers.
///
/// Unknown class names resolve to [`ModelClass::Fast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelClass {
    Fast,
    Quality,
    Titan,
}

impl ModelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelClass::Fast => "fast",
            ModelClass::Quality => "quality",
            ModelClass::Titan => "titan",
        }
    }

    /// Parse a class name, falling back to `Fast` for anything unrecognized.
    pub fn parse_or_default(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "quality" => ModelClass::Quality,
            "titan" => ModelClass::Titan,
            _ => ModelClass::Fast,
        }
    }
}

impl std::fmt::Display for ModelClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from model classes to concrete external model identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMap {
    pub fast: String,
    pub quality: String,
    pub titan: String,
}

impl ModelMap {
    /// Resolve a class to its external model identifier.
    pub fn resolve(&self, class: ModelClass) -> &str {
        match class {
            ModelClass::Fast => &self.fast,
            ModelClass::Quality => &self.quality,
            ModelClass::Titan => &self.titan,
        }
    }
}

impl Default for ModelMap {
    fn default() -> Self {
        Self {
            fast: "amazon.nova-lite-v1:0".into(),
            quality: "amazon.nova-pro-v1:0".into(),
            titan: "amazon.titan-text-express-v1".into(),
        }
    }
}

/// Static configuration for the generation client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the model invocation endpoint.
    pub endpoint: String,
    /// Bearer credential sent with each invocation.
    pub api_key: Option<String>,
    /// Model class to identifier mapping.
    pub models: ModelMap,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            models: ModelMap::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_models(mut self, models: ModelMap) -> Self {
        self.models = models;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_resolution() {
        let map = ModelMap::default();
        assert_eq!(map.resolve(ModelClass::Fast), "amazon.nova-lite-v1:0");
        assert_eq!(map.resolve(ModelClass::Quality), "amazon.nova-pro-v1:0");
        assert_eq!(map.resolve(ModelClass::Titan), "amazon.titan-text-express-v1");
    }

    #[test]
    fn test_unknown_class_falls_back_to_fast() {
        assert_eq!(ModelClass::parse_or_default("fast"), ModelClass::Fast);
        assert_eq!(ModelClass::parse_or_default("QUALITY"), ModelClass::Quality);
        assert_eq!(ModelClass::parse_or_default("experimental"), ModelClass::Fast);
        assert_eq!(ModelClass::parse_or_default(""), ModelClass::Fast);
    }
}
