//! Chat HTTP handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::info;

use crate::chat::{self, ChatPayload};
use crate::response;
use crate::server::AppState;

/// POST /api/v1/chat
///
/// Validates the payload, dispatches it to the selected provider, and
/// renders either the normalized reply or a classified error. Bodies the
/// extractor cannot parse surface as the same `BadRequest` shape as
/// validation failures.
pub async fn send_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return response::bad_request(rejection.body_text()),
    };

    let request = match chat::validate(payload) {
        Ok(request) => request,
        Err(e) => return response::chat_error(e),
    };

    info!(
        provider = %request.provider,
        generate_image = request.generate_image,
        "processing chat message"
    );

    match state.dispatcher.dispatch(request).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => response::chat_error(e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::chat::Dispatcher;
    use crate::llm::{ErrorCategory, LLMError, LLMProvider, Provider, ProviderRegistry};
    use crate::server::{AppState, build_app};

    struct StubProvider {
        text: Result<&'static str, u16>,
        image: Result<&'static str, u16>,
        text_calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(text: Result<&'static str, u16>, image: Result<&'static str, u16>) -> Arc<Self> {
            Arc::new(Self {
                text,
                image,
                text_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LLMProvider for StubProvider {
        async fn generate_text(&self, _message: &str) -> Result<String, LLMError> {
            self.text_calls.fetch_add(1, Ordering::SeqCst);
            match self.text {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(LLMError::Api {
                    status,
                    message: "stub failure".to_string(),
                }),
            }
        }

        async fn generate_image(&self, _prompt: &str) -> Result<String, LLMError> {
            match self.image {
                Ok(image) => Ok(image.to_string()),
                Err(status) => Err(LLMError::Api {
                    status,
                    message: "stub failure".to_string(),
                }),
            }
        }

        fn classify_error(&self, error: &LLMError) -> ErrorCategory {
            match error {
                LLMError::Api { status: 401, .. } => ErrorCategory::Unauthorized,
                _ => ErrorCategory::Internal,
            }
        }
    }

    fn app_with(stub: Arc<StubProvider>) -> Router {
        let mut registry = ProviderRegistry::new();
        registry.register(Provider::Gemini, stub);
        let state = AppState {
            dispatcher: Dispatcher::new(registry),
        };
        build_app(state, 5)
    }

    async fn post_chat(app: Router, body: String) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_chat_success() {
        let stub = StubProvider::new(Ok("hi there"), Ok("unused"));
        let body = serde_json::json!({"message": "hello", "model": "gemini"});

        let (status, body) = post_chat(app_with(stub), body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"text": "hi there"}));
    }

    #[tokio::test]
    async fn test_chat_with_image() {
        let stub = StubProvider::new(Ok("hi"), Ok("https://img.example/1.png"));
        let body =
            serde_json::json!({"message": "hello", "model": "gemini", "generateImage": true});

        let (status, body) = post_chat(app_with(stub), body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"text": "hi", "image": "https://img.example/1.png"})
        );
    }

    #[tokio::test]
    async fn test_image_failure_still_returns_text() {
        let stub = StubProvider::new(Ok("hi"), Err(500));
        let body =
            serde_json::json!({"message": "hello", "model": "gemini", "generateImage": true});

        let (status, body) = post_chat(app_with(stub), body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "hi");
        assert_eq!(body["warning"], "Failed to generate image");
        assert!(body.get("image").is_none());
    }

    #[tokio::test]
    async fn test_empty_message_rejected_before_provider_call() {
        let stub = StubProvider::new(Ok("unused"), Ok("unused"));
        let body = serde_json::json!({"message": "", "model": "gemini"});

        let (status, response) = post_chat(app_with(stub.clone()), body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["category"], "BadRequest");
        assert_eq!(stub.text_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_model_rejected() {
        let stub = StubProvider::new(Ok("unused"), Ok("unused"));
        let body = serde_json::json!({"message": "hello", "model": "claude"});

        let (status, response) = post_chat(app_with(stub), body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["category"], "BadRequest");
    }

    #[tokio::test]
    async fn test_non_boolean_generate_image_rejected() {
        let stub = StubProvider::new(Ok("unused"), Ok("unused"));
        let body =
            serde_json::json!({"message": "hello", "model": "gemini", "generateImage": "yes"});

        let (status, response) = post_chat(app_with(stub), body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["category"], "BadRequest");
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_status() {
        let stub = StubProvider::new(Err(401), Ok("unused"));
        let body = serde_json::json!({"message": "hello", "model": "gemini"});

        let (status, response) = post_chat(app_with(stub), body.to_string()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(response["category"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let stub = StubProvider::new(Ok("unused"), Ok("unused"));

        let (status, response) = post_chat(app_with(stub), "not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["category"], "BadRequest");
    }
}
