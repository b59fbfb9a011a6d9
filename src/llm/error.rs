//! LLM error types and classification categories.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body lacked the expected content
    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

/// Client-facing category a provider failure is mapped to.
///
/// Each provider supplies its own mapping from native error signals to these
/// categories; anything unrecognized falls back to `Internal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    Unauthorized,
    BadRequest,
    Unavailable,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Unauthorized => "Unauthorized",
            ErrorCategory::BadRequest => "BadRequest",
            ErrorCategory::Unavailable => "Unavailable",
            ErrorCategory::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify transport-level failures shared by all providers.
///
/// Connection and timeout failures are transient; everything else reqwest
/// can surface here is unclassifiable.
pub(crate) fn classify_transport(error: &reqwest::Error) -> ErrorCategory {
    if error.is_connect() || error.is_timeout() {
        ErrorCategory::Unavailable
    } else {
        ErrorCategory::Internal
    }
}
