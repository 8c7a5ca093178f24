//! Client core: the generate loop, batch variations, and the liveness probe.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cache::{CacheBackend, CacheKey, CACHE_TTL};
use crate::config::{ClientConfig, ModelClass};
use crate::error::{Error, InvokeError};
use crate::family::ModelFamily;
use crate::transport::ModelInvoker;
use crate::types::{approx_tokens, ConnectionStatus, GenerationRequest, GenerationResult};
use crate::usage::{UsageEvent, UsageSink};
use crate::Result;

use super::policy::{self, Decision};

/// Cache-aware generation client with bounded retries.
///
/// All operations are sequential from the caller's perspective: the external
/// call and any backoff sleep block the invoking task, and no internal
/// concurrency is introduced. Callers wanting parallel variations issue their
/// own concurrent `generate` calls.
pub struct GenerationClient {
    pub(crate) config: ClientConfig,
    pub(crate) invoker: Arc<dyn ModelInvoker>,
    pub(crate) cache: Arc<dyn CacheBackend>,
    pub(crate) usage: Arc<dyn UsageSink>,
}

impl GenerationClient {
    /// Generate text for a prompt.
    ///
    /// Consults the cache first when enabled, then attempts the external call
    /// up to `max_retries` times with classified backoff, and stores a fresh
    /// success back under the same key with a one-hour expiry. Elapsed time in
    /// the result covers the successful invocation only.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        if request.max_tokens == 0 {
            return Err(Error::invalid_request("max_tokens must be greater than zero"));
        }
        if request.max_retries == 0 {
            return Err(Error::invalid_request("max_retries must be at least 1"));
        }

        let model_id = self.config.models.resolve(request.model_class).to_string();
        let key = CacheKey::derive(&request.prompt, &model_id, request.max_tokens);

        if request.use_cache {
            if let Some(hit) = self.cache_lookup(&key).await {
                debug!(model_id = model_id.as_str(), cache_key = %key, "cache hit");
                self.record_usage(&hit).await;
                return Ok(hit);
            }
        }

        let family = ModelFamily::classify(&model_id);
        let body = family.build_body(&request.prompt, request.max_tokens);

        let mut attempt = 0u32;
        let mut invoke_ms = 0u64;
        loop {
            attempt += 1;
            let start = Instant::now();
            let outcome = self.invoker.invoke(&model_id, &body).await;
            let elapsed = start.elapsed();
            invoke_ms += elapsed.as_millis() as u64;

            let err = match outcome {
                Ok(response) => match family.extract_text(&response) {
                    Some(text) if !text.trim().is_empty() => {
                        let result = GenerationResult {
                            prompt_tokens: approx_tokens(&request.prompt),
                            generated_tokens: approx_tokens(&text),
                            text,
                            model_id,
                            model_class: request.model_class,
                            duration_ms: elapsed.as_millis() as u64,
                            from_cache: false,
                            attempt,
                        };
                        info!(
                            model_id = result.model_id.as_str(),
                            family = family.as_str(),
                            attempt,
                            duration_ms = result.duration_ms,
                            generated_tokens = result.generated_tokens,
                            "generation succeeded"
                        );
                        if request.use_cache {
                            self.cache_store(&key, &result).await;
                        }
                        self.record_usage(&result).await;
                        return Ok(result);
                    }
                    Some(_) => InvokeError::EmptyCompletion,
                    None => InvokeError::Decode {
                        message: format!("no text at the {} response path", family),
                    },
                },
                Err(e) => e,
            };

            match policy::decide(&err, attempt, request.max_retries) {
                Decision::Retry { delay } => {
                    warn!(
                        model_id = model_id.as_str(),
                        attempt,
                        error_class = err.class(),
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Decision::Abort => {
                    warn!(
                        model_id = model_id.as_str(),
                        attempt,
                        error_class = err.class(),
                        "non-retryable failure, aborting"
                    );
                    self.record_failure(&model_id, request, attempt, invoke_ms).await;
                    return Err(Error::Invoke(err));
                }
                Decision::Exhausted => {
                    warn!(
                        model_id = model_id.as_str(),
                        attempts = attempt,
                        error_class = err.class(),
                        "retry budget exhausted"
                    );
                    self.record_failure(&model_id, request, attempt, invoke_ms).await;
                    return Err(Error::Exhausted {
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    /// Generate `count` independent variations of a prompt.
    ///
    /// Each variation carries an appended instruction naming its index and
    /// bypasses the cache so variations cannot collapse into one cached value.
    /// A variation that exhausts its retries is logged and skipped, so the
    /// returned list may be shorter than `count`.
    pub async fn generate_variations(
        &self,
        prompt: &str,
        count: u32,
        model_class: ModelClass,
    ) -> Vec<GenerationResult> {
        let mut results = Vec::with_capacity(count as usize);
        for index in 1..=count {
            let varied = format!(
                "{}\n\nVariasi {}: berikan versi yang berbeda dari variasi sebelumnya.",
                prompt, index
            );
            let request = GenerationRequest::new(varied)
                .model_class(model_class)
                .use_cache(false);
            match self.generate(&request).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(variation = index, error = %e, "variation failed, skipping");
                }
            }
        }
        results
    }

    /// Liveness probe: a minimal generation with a trivial prompt and a tiny
    /// token budget, bypassing the cache.
    pub async fn test_connection(&self) -> ConnectionStatus {
        let request = GenerationRequest::new("Halo")
            .max_tokens(10)
            .use_cache(false)
            .max_retries(1);
        let model_id = self.config.models.resolve(request.model_class).to_string();
        let start = Instant::now();
        match self.generate(&request).await {
            Ok(result) => ConnectionStatus {
                success: true,
                model_id: result.model_id,
                duration_ms: result.duration_ms,
                error: None,
            },
            Err(e) => ConnectionStatus {
                success: false,
                model_id,
                duration_ms: start.elapsed().as_millis() as u64,
                error: Some(e.to_string()),
            },
        }
    }

    /// Resolved model identifier for a class, exposed for callers that report
    /// availability (e.g. admin status pages).
    pub fn resolve_model(&self, class: ModelClass) -> &str {
        self.config.models.resolve(class)
    }

    async fn cache_lookup(&self, key: &CacheKey) -> Option<GenerationResult> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<GenerationResult>(&bytes) {
                Ok(mut result) => {
                    result.from_cache = true;
                    Some(result)
                }
                Err(e) => {
                    // Corrupt entry: drop it and regenerate.
                    warn!(cache_key = %key, error = %e, "discarding undecodable cache entry");
                    let _ = self.cache.delete(key).await;
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "cache lookup failed");
                None
            }
        }
    }

    async fn cache_store(&self, key: &CacheKey, result: &GenerationResult) {
        match serde_json::to_vec(result) {
            Ok(bytes) => {
                if let Err(e) = self.cache.set(key, &bytes, CACHE_TTL).await {
                    warn!(cache_key = %key, error = %e, "cache store failed");
                }
            }
            Err(e) => warn!(cache_key = %key, error = %e, "cache serialization failed"),
        }
    }

    async fn record_usage(&self, result: &GenerationResult) {
        let event = UsageEvent {
            model_id: result.model_id.clone(),
            model_class: result.model_class,
            success: true,
            prompt_tokens: result.prompt_tokens,
            generated_tokens: result.generated_tokens,
            duration_ms: result.duration_ms,
            from_cache: result.from_cache,
        };
        if let Err(e) = self.usage.record(event).await {
            warn!(error = %e, "usage accounting failed");
        }
    }

    /// Report a failed request. `invoke_ms` is the invocation time summed
    /// across all attempts, excluding backoff waits.
    async fn record_failure(
        &self,
        model_id: &str,
        request: &GenerationRequest,
        attempts: u32,
        invoke_ms: u64,
    ) {
        let event = UsageEvent {
            model_id: model_id.to_string(),
            model_class: request.model_class,
            success: false,
            prompt_tokens: approx_tokens(&request.prompt),
            generated_tokens: 0,
            duration_ms: invoke_ms,
            from_cache: false,
        };
        debug!(model_id, attempts, "recording failed request");
        if let Err(e) = self.usage.record(event).await {
            warn!(error = %e, "usage accounting failed");
        }
    }
}
