//! Error types for LLM generation operations.

use crate::schema::SchemaError;
use core::time::Duration;

/// Errors for single prompt completion.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The underlying model call failed. Passed through as returned by the model.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The model call succeeded but produced no choices.
    #[error("empty response from model")]
    EmptyResponse,
}

/// Errors for structured output extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The underlying model call failed. Passed through as returned by the model.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The model call succeeded but produced no choices.
    #[error("empty response from model")]
    EmptyResponse,

    /// No JSON schema could be derived for the output type.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The cleaned model output is not valid JSON for the output type.
    #[error("error unmarshalling response. Err - {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl From<CompletionError> for ExtractionError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Generation(err) => Self::Generation(err),
            CompletionError::EmptyResponse => Self::EmptyResponse,
        }
    }
}

/// Errors for LLM generation operations.
///
/// This is the vocabulary model adapters report failures in. The helpers in
/// this crate never construct these themselves; they forward whatever the
/// adapter returned.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Http error (e.g.: connection error, timeout, etc.)
    #[error("http error: {0}")]
    Http(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Rate limited by the provider.
    #[error("rate limited{}", .retry_after.map(|d| format!(", retry after {d:?}")).unwrap_or_default())]
    RateLimited {
        /// Suggested time to wait before retrying.
        retry_after: Option<Duration>,
    },

    /// Error building the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Error parsing the response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Request contains content that the provider does not support.
    #[error("unsupported content: {0}")]
    UnsupportedContent(String),

    /// The model refused to fulfill the request (e.g. content policy).
    #[error("model refused the request: {0}")]
    Refusal(String),

    /// The call was cancelled through its [`Context`](crate::context::Context).
    #[error("context canceled")]
    Cancelled,

    /// The deadline of the call's [`Context`](crate::context::Context) passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// Error returned by the model provider.
    #[error("provider error: {message}")]
    Provider {
        /// HTTP status code if available.
        status: Option<u16>,
        /// Error message.
        message: String,
        /// The underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GenerationError {
    /// Creates a [`Provider`](Self::Provider) error with only a message.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            status: None,
            message: message.into(),
            source: None,
        }
    }
}
