//! Inbound request validation.

use serde_json::Value;

use super::types::{ChatError, ChatPayload, ChatRequest};
use crate::llm::Provider;

/// Validate an untrusted payload into a well-formed request.
///
/// Pure; performs no I/O. All rejections are `BadRequest` and happen before
/// any provider call is made.
pub fn validate(payload: ChatPayload) -> Result<ChatRequest, ChatError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(ChatError::bad_request("message cannot be empty"));
    }

    let Some(provider) = Provider::from_name(&payload.model) else {
        return Err(ChatError::bad_request(format!(
            "unknown model '{}': expected 'gemini' or 'openai'",
            payload.model
        )));
    };

    let generate_image = match payload.generate_image {
        None => false,
        Some(Value::Bool(flag)) => flag,
        Some(_) => {
            return Err(ChatError::bad_request("generateImage must be a boolean"));
        }
    };

    Ok(ChatRequest {
        message: message.to_string(),
        provider,
        generate_image,
    })
}
