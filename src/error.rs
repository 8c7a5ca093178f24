use thiserror::Error;

/// Unified error type for the generation client.
///
/// The invocation layer produces [`InvokeError`]; the retry loop in the client
/// aggregates an exhausted budget into [`Error::Exhausted`], so callers see a
/// single failure carrying the last underlying cause and the attempt count.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error("Generation failed after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: InvokeError,
    },
}

/// Classified failure of a single model invocation.
///
/// The retry loop pattern-matches on this taxonomy instead of inspecting
/// error strings: throttling and service-unavailable are transient and back
/// off exponentially, decode/transport/empty-text failures retry after a
/// fixed short delay, and any other service error aborts immediately.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Model invocation throttled: {message}")]
    Throttled { message: String },

    #[error("Model service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Model service error {code}: {message}")]
    Service { code: String, message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Response decode error: {message}")]
    Decode { message: String },

    #[error("Model returned an empty completion")]
    EmptyCompletion,
}

impl InvokeError {
    /// Short classification label used in structured log fields.
    pub fn class(&self) -> &'static str {
        match self {
            InvokeError::Throttled { .. } => "throttled",
            InvokeError::ServiceUnavailable { .. } => "service_unavailable",
            InvokeError::Service { .. } => "service_error",
            InvokeError::Transport { .. } => "transport",
            InvokeError::Decode { .. } => "decode",
            InvokeError::EmptyCompletion => "empty_completion",
        }
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: msg.into(),
        }
    }

    pub fn cache(msg: impl Into<String>) -> Self {
        Error::Cache {
            message: msg.into(),
        }
    }
}
