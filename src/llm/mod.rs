//! LLM provider clients for text and image generation.

mod error;
mod gemini;
mod openai;
mod provider;
mod registry;

pub use error::{ErrorCategory, LLMError};
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
pub use provider::{LLMProvider, Provider};
pub use registry::ProviderRegistry;
