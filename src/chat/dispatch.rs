//! Provider dispatch and outcome normalization.

use tracing::warn;

use super::types::{ChatError, ChatReply, ChatRequest};
use crate::llm::ProviderRegistry;

/// Notice attached to a reply when image generation failed but text succeeded.
const IMAGE_WARNING: &str = "Failed to generate image";

/// Routes validated requests to the selected provider and normalizes the
/// outcome into a `ChatReply` or a classified `ChatError`.
///
/// Text failure is fatal for the call; image failure is downgraded to a
/// warning on an otherwise successful reply. The image call only runs after
/// text has succeeded, which is what makes that downgrade possible.
#[derive(Clone)]
pub struct Dispatcher {
    providers: ProviderRegistry,
}

impl Dispatcher {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self { providers }
    }

    /// Dispatch one request. No retries, no state held across calls.
    pub async fn dispatch(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let Some(provider) = self.providers.get(&request.provider) else {
            return Err(ChatError::unavailable(format!(
                "provider '{}' is not configured",
                request.provider
            )));
        };

        let text = match provider.generate_text(&request.message).await {
            Ok(text) => text,
            Err(e) => {
                let category = provider.classify_error(&e);
                return Err(ChatError::new(category, e.to_string()));
            }
        };

        if !request.generate_image {
            return Ok(ChatReply::text(text));
        }

        // Each provider applies its own prompt-construction rule internally.
        match provider.generate_image(&request.message).await {
            Ok(image) => Ok(ChatReply {
                text,
                image: Some(image),
                warning: None,
            }),
            Err(e) => {
                warn!(provider = %request.provider, error = %e, "image generation failed");
                Ok(ChatReply {
                    text,
                    image: None,
                    warning: Some(IMAGE_WARNING.to_string()),
                })
            }
        }
    }
}
