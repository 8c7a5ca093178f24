//! Usage accounting.
//!
//! The client reports each request outcome to a [`UsageSink`] so the
//! surrounding application can keep longer-term statistics. The client never
//! persists usage itself; the default sink discards events.

use crate::config::ModelClass;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Outcome of one generation request, as reported to the accounting store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageEvent {
    pub model_id: String,
    pub model_class: ModelClass,
    pub success: bool,
    pub prompt_tokens: u32,
    pub generated_tokens: u32,
    pub duration_ms: u64,
    pub from_cache: bool,
}

/// Destination for usage events.
#[async_trait]
pub trait UsageSink: Send + Sync {
    async fn record(&self, event: UsageEvent) -> Result<()>;
}

/// Default sink: discards everything.
pub struct NoopUsageSink;

#[async_trait]
impl UsageSink for NoopUsageSink {
    async fn record(&self, _event: UsageEvent) -> Result<()> {
        Ok(())
    }
}

pub fn noop_sink() -> Arc<dyn UsageSink> {
    Arc::new(NoopUsageSink)
}

/// In-memory sink for tests and diagnostics.
pub struct InMemoryUsageSink {
    events: Arc<RwLock<Vec<UsageEvent>>>,
}

impl InMemoryUsageSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<UsageEvent> {
        self.events.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUsageSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageSink for InMemoryUsageSink {
    async fn record(&self, event: UsageEvent) -> Result<()> {
        self.events.write().unwrap().push(event);
        Ok(())
    }
}

/// USD pricing per 1K tokens for each model class.
#[derive(Debug, Clone, Copy)]
pub struct ClassPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl ClassPricing {
    pub fn for_class(class: ModelClass) -> Self {
        match class {
            ModelClass::Fast => Self {
                input_per_1k: 0.00025,
                output_per_1k: 0.00125,
            },
            ModelClass::Quality => Self {
                input_per_1k: 0.003,
                output_per_1k: 0.015,
            },
            ModelClass::Titan => Self {
                input_per_1k: 0.0008,
                output_per_1k: 0.0016,
            },
        }
    }
}

/// Estimate the USD cost of a generation from its approximate token counts.
pub fn estimate_cost(prompt_tokens: u32, generated_tokens: u32, class: ModelClass) -> f64 {
    let pricing = ClassPricing::for_class(class);
    (prompt_tokens as f64 / 1000.0) * pricing.input_per_1k
        + (generated_tokens as f64 / 1000.0) * pricing.output_per_1k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_sink_records() {
        let sink = InMemoryUsageSink::new();
        sink.record(UsageEvent {
            model_id: "amazon.nova-lite-v1:0".into(),
            model_class: ModelClass::Fast,
            success: true,
            prompt_tokens: 3,
            generated_tokens: 12,
            duration_ms: 40,
            from_cache: false,
        })
        .await
        .unwrap();
        assert_eq!(sink.len(), 1);
        assert!(sink.events()[0].success);
    }

    #[test]
    fn test_cost_estimation() {
        // 1000 input + 1000 output tokens at fast-tier pricing.
        let cost = estimate_cost(1000, 1000, ModelClass::Fast);
        assert!((cost - 0.0015).abs() < 1e-12);
        assert_eq!(estimate_cost(0, 0, ModelClass::Quality), 0.0);
        assert!(estimate_cost(500, 500, ModelClass::Quality) > estimate_cost(500, 500, ModelClass::Titan));
    }
}
