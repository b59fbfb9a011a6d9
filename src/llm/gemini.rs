//! Google Gemini provider using the generateContent REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{ErrorCategory, LLMError, classify_transport};
use super::provider::LLMProvider;

/// Gemini provider with native API format.
///
/// The API key travels as a `key` query parameter rather than a header.
/// Image generation reuses `generateContent` against a vision model and
/// returns the model's textual descriptor in place of a URL.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    image_model: String,
}

impl GeminiProvider {
    pub const DEFAULT_BASE_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta";

    pub fn new(
        client: Client,
        api_key: String,
        base_url: String,
        model: String,
        image_model: String,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
            image_model,
        }
    }

    async fn generate(&self, model: &str, text: &str) -> Result<String, LLMError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&generate_request(text))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::Api { status, message });
        }

        let body: GenerateResponse = response.json().await?;
        text_of(body)
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate_text(&self, message: &str) -> Result<String, LLMError> {
        self.generate(&self.model, message).await
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, LLMError> {
        self.generate(&self.image_model, &image_prompt(prompt)).await
    }

    fn classify_error(&self, error: &LLMError) -> ErrorCategory {
        classify(error)
    }
}

/// Gemini has no dedicated image endpoint; the vision model is instructed
/// through the prompt instead.
fn image_prompt(message: &str) -> String {
    format!("Generate an image based on this description: {message}")
}

/// Map Gemini error signals to client-facing categories.
///
/// Gemini reports a rejected key as HTTP 400 with "API key not valid" in the
/// body, so the message is inspected before the status code.
fn classify(error: &LLMError) -> ErrorCategory {
    match error {
        LLMError::Request(e) => classify_transport(e),
        LLMError::Api { status, message } => {
            if message.contains("API key not valid") || *status == 401 || *status == 403 {
                ErrorCategory::Unauthorized
            } else if *status == 404
                || message.contains("not found")
                || message.contains("not supported")
            {
                ErrorCategory::BadRequest
            } else {
                ErrorCategory::Internal
            }
        }
        LLMError::Malformed(_) => ErrorCategory::Internal,
    }
}

// --- Gemini format types and conversions ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

fn generate_request(text: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![RequestContent {
            role: "user".to_string(),
            parts: vec![RequestPart {
                text: text.to_string(),
            }],
        }],
    }
}

fn text_of(response: GenerateResponse) -> Result<String, LLMError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::Malformed("response contained no candidates".to_string()))?;

    Ok(candidate
        .content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join(""))
}
