//! LLM provider trait and provider selection.

use async_trait::async_trait;

use super::error::{ErrorCategory, LLMError};

/// Trait for LLM providers with different API formats.
///
/// Text and image generation are independent capabilities; image prompt
/// construction is provider-specific and happens inside `generate_image`.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a text completion for a single user message.
    async fn generate_text(&self, message: &str) -> Result<String, LLMError>;

    /// Generate an image reference (URL or inline descriptor) for a prompt.
    async fn generate_image(&self, prompt: &str) -> Result<String, LLMError>;

    /// Map a provider-native failure to a client-facing category.
    ///
    /// Best-effort: provider error surfaces are not stable, so unmatched
    /// failures must map to `ErrorCategory::Internal`.
    fn classify_error(&self, error: &LLMError) -> ErrorCategory;
}

/// The set of providers a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gemini,
    OpenAI,
}

impl Provider {
    /// Parse the wire identifier used in chat requests.
    pub fn from_name(name: &str) -> Option<Provider> {
        match name {
            "gemini" => Some(Provider::Gemini),
            "openai" => Some(Provider::OpenAI),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAI => "openai",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
