//! Request-scoped value objects for the chat core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::{ErrorCategory, Provider};

/// The untrusted inbound payload as posted by the browser client.
///
/// `generate_image` is accepted as an arbitrary JSON value so that a
/// non-boolean flag is rejected by validation rather than silently coerced
/// or bounced by the deserializer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub message: String,
    pub model: String,
    #[serde(default)]
    pub generate_image: Option<serde_json::Value>,
}

/// A validated chat request. The message is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub provider: Provider,
    pub generate_image: bool,
}

/// A normalized chat result.
///
/// `text` is always present. `image` is present only when image generation
/// was requested and succeeded; `warning` is set instead when it failed
/// while text generation succeeded. Absent fields are omitted from the
/// serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ChatReply {
    pub fn text(text: String) -> Self {
        Self {
            text,
            image: None,
            warning: None,
        }
    }
}

/// A classified failure, produced whenever a `ChatReply` cannot be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{category}: {message}")]
pub struct ChatError {
    pub category: ErrorCategory,
    pub message: String,
}

impl ChatError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::BadRequest, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Internal, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_serialization_omits_absent_fields() {
        let reply = ChatReply::text("hi there".to_string());
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({"text": "hi there"})
        );
    }

    #[test]
    fn test_reply_serialization_with_image() {
        let reply = ChatReply {
            text: "hi".to_string(),
            image: Some("https://img.example/1.png".to_string()),
            warning: None,
        };
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({"text": "hi", "image": "https://img.example/1.png"})
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = ChatError::bad_request("message cannot be empty");
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({
                "category": "BadRequest",
                "message": "message cannot be empty"
            })
        );
    }

    #[test]
    fn test_error_display() {
        let error = ChatError::unavailable("provider 'gemini' is not configured");
        assert_eq!(
            error.to_string(),
            "Unavailable: provider 'gemini' is not configured"
        );
    }
}
