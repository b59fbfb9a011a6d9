//! OpenAI provider for chat completions and image generations.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{ErrorCategory, LLMError, classify_transport};
use super::provider::LLMProvider;

/// OpenAI provider with bearer authentication.
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    image_size: String,
}

impl OpenAIProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    pub fn new(
        client: Client,
        api_key: String,
        base_url: String,
        model: String,
        image_size: String,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
            image_size,
        }
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, LLMError>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn generate_text(&self, message: &str) -> Result<String, LLMError> {
        let request = completion_request(&self.model, message);
        let response: CompletionResponse = self.post("/chat/completions", &request).await?;
        text_of(response)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, LLMError> {
        // OpenAI's image endpoint takes the user message as-is.
        let request = image_request(prompt, &self.image_size);
        let response: ImageResponse = self.post("/images/generations", &request).await?;
        image_url(response)
    }

    fn classify_error(&self, error: &LLMError) -> ErrorCategory {
        classify(error)
    }
}

/// Map OpenAI error signals to client-facing categories.
fn classify(error: &LLMError) -> ErrorCategory {
    match error {
        LLMError::Request(e) => classify_transport(e),
        LLMError::Api { status, message } => {
            if *status == 401
                || message.contains("Incorrect API key")
                || message.contains("invalid_api_key")
            {
                ErrorCategory::Unauthorized
            } else if *status == 404
                || message.contains("model_not_found")
                || message.contains("does not exist")
            {
                ErrorCategory::BadRequest
            } else {
                ErrorCategory::Internal
            }
        }
        LLMError::Malformed(_) => ErrorCategory::Internal,
    }
}

// --- OpenAI format types and conversions ---

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<CompletionMessage>,
}

#[derive(Serialize)]
struct CompletionMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest {
    prompt: String,
    n: u8,
    size: String,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
}

fn completion_request(model: &str, message: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![CompletionMessage {
            role: "user".to_string(),
            content: message.to_string(),
        }],
    }
}

fn image_request(prompt: &str, size: &str) -> ImageRequest {
    ImageRequest {
        prompt: prompt.to_string(),
        n: 1,
        size: size.to_string(),
    }
}

fn text_of(response: CompletionResponse) -> Result<String, LLMError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::Malformed("response contained no choices".to_string()))?;
    Ok(choice.message.content.unwrap_or_default())
}

fn image_url(response: ImageResponse) -> Result<String, LLMError> {
    response
        .data
        .into_iter()
        .next()
        .and_then(|d| d.url)
        .ok_or_else(|| LLMError::Malformed("image response contained no url".to_string()))
}
