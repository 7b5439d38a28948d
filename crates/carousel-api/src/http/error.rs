//! Application error type mapping chat failures to HTTP responses.
//!
//! Every error body is `{ "error": message }`. Validation failures map
//! to 400, configuration and upstream failures to 500, matching the
//! contract the chat UI expects.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use carousel_infra::secret::API_KEY_VAR;
use carousel_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat engine errors (validation, configuration, upstream).
    Chat(ChatError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Chat(ChatError::EmptyMessage) => {
                (StatusCode::BAD_REQUEST, "No message provided".to_string())
            }
            AppError::Chat(ChatError::UnknownPersona(key)) => {
                (StatusCode::BAD_REQUEST, format!("Unknown persona '{key}'"))
            }
            AppError::Chat(ChatError::MissingApiKey) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "{API_KEY_VAR} is not configured. Please set your API key in the environment variables."
                ),
            ),
            AppError::Chat(ChatError::Upstream {
                model,
                fallback,
                source,
            }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Model {model} error ({source}). Falling back to {fallback}."),
            ),
            AppError::Chat(ChatError::History(err)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("History persistence failed: {err}"),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
