//! Model invocation transport.
//!
//! [`ModelInvoker`] is the seam between the retry loop and the wire: a single
//! attempt in, a classified outcome out. [`HttpInvoker`] implements it over
//! reqwest against a Bedrock-style invocation endpoint
//! (`POST {base}/model/{model_id}/invoke`). Tests substitute scripted
//! invokers through the same trait.

use crate::config::ClientConfig;
use crate::error::{Error, InvokeError};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use url::Url;
use uuid::Uuid;

/// Single-attempt model invocation. No retries at this layer; the client's
/// policy loop owns the budget.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, model_id: &str, body: &Value) -> std::result::Result<Value, InvokeError>;
}

/// HTTP transport for a hosted text-generation service.
pub struct HttpInvoker {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpInvoker {
    /// Build the transport from static configuration.
    ///
    /// Fails at construction on a missing or unparseable endpoint so that
    /// misconfiguration surfaces immediately rather than on first use.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(Error::configuration("invocation endpoint is not set"));
        }
        let parsed = Url::parse(&config.endpoint)
            .map_err(|e| Error::configuration(format!("invalid endpoint '{}': {}", config.endpoint, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "endpoint must be http(s), got '{}'",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Classify a non-success response into the invocation error taxonomy.
    ///
    /// The service names its condition in the `x-amzn-errortype` header or a
    /// `__type` field in the body; HTTP status is the fallback signal.
    fn classify_failure(status: u16, error_type: Option<&str>, body: &str) -> InvokeError {
        let code = error_type
            .map(|t| t.split(':').next().unwrap_or(t).to_string())
            .or_else(|| {
                serde_json::from_str::<Value>(body)
                    .ok()
                    .and_then(|v| v.get("__type").and_then(|t| t.as_str()).map(String::from))
            })
            .unwrap_or_else(|| format!("http_{}", status));

        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| body.chars().take(200).collect());

        if code.contains("Throttling") || status == 429 {
            InvokeError::Throttled { message }
        } else if code.contains("ServiceUnavailable") || status == 503 {
            InvokeError::ServiceUnavailable { message }
        } else {
            InvokeError::Service { code, message }
        }
    }
}

#[async_trait]
impl ModelInvoker for HttpInvoker {
    async fn invoke(&self, model_id: &str, body: &Value) -> std::result::Result<Value, InvokeError> {
        let url = format!("{}/model/{}/invoke", self.base_url, model_id);
        let client_request_id = Uuid::new_v4().to_string();

        let mut req = self
            .client
            .post(&url)
            .json(body)
            .header("x-client-request-id", &client_request_id);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(|e| InvokeError::Transport {
            message: e.to_string(),
        })?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let error_type = resp
                .headers()
                .get("x-amzn-errortype")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let text = resp.text().await.unwrap_or_default();
            let err = Self::classify_failure(status, error_type.as_deref(), &text);
            info!(
                http_status = status,
                error_class = err.class(),
                model_id,
                client_request_id = client_request_id.as_str(),
                "model invocation failed"
            );
            return Err(err);
        }

        resp.json::<Value>().await.map_err(|e| InvokeError::Decode {
            message: format!("invalid response JSON: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_throttling_by_header() {
        let err = HttpInvoker::classify_failure(
            400,
            Some("ThrottlingException:http://internal"),
            r#"{"message":"Rate exceeded"}"#,
        );
        assert!(matches!(err, InvokeError::Throttled { .. }));
    }

    #[test]
    fn test_classify_throttling_by_status() {
        let err = HttpInvoker::classify_failure(429, None, "busy");
        assert!(matches!(err, InvokeError::Throttled { .. }));
    }

    #[test]
    fn test_classify_unavailable() {
        let err = HttpInvoker::classify_failure(503, None, "");
        assert!(matches!(err, InvokeError::ServiceUnavailable { .. }));
        let err = HttpInvoker::classify_failure(500, Some("ServiceUnavailableException"), "");
        assert!(matches!(err, InvokeError::ServiceUnavailable { .. }));
    }

    #[test]
    fn test_classify_other_service_error() {
        let err = HttpInvoker::classify_failure(
            400,
            Some("ValidationException"),
            r#"{"message":"bad input"}"#,
        );
        match err {
            InvokeError::Service { code, message } => {
                assert_eq!(code, "ValidationException");
                assert_eq!(message, "bad input");
            }
            other => panic!("expected Service, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_code_from_body_type_field() {
        let err = HttpInvoker::classify_failure(400, None, r#"{"__type":"ThrottlingException"}"#);
        assert!(matches!(err, InvokeError::Throttled { .. }));
    }

    #[test]
    fn test_rejects_bad_endpoint_at_construction() {
        let config = ClientConfig::new("not a url");
        assert!(HttpInvoker::new(&config).is_err());
        let config = ClientConfig::new("");
        assert!(HttpInvoker::new(&config).is_err());
        let config = ClientConfig::new("ftp://example.com");
        assert!(HttpInvoker::new(&config).is_err());
    }
}
