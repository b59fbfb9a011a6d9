//! Uniform JSON error responses.
//!
//! Every failure leaving the API has the shape `{"category": ..., "message":
//! ...}`, with the HTTP status derived from the category.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::chat::ChatError;
use crate::llm::ErrorCategory;

/// Render a classified chat error as its HTTP response.
pub fn chat_error(error: ChatError) -> Response {
    let status = match error.category {
        ErrorCategory::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCategory::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCategory::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(error)).into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    chat_error(ChatError::bad_request(message))
}
