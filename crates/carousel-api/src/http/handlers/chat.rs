//! Chat endpoints.
//!
//! POST /chat  -- body `{ "message": string, "persona"?: string }`,
//!                replies `{ "reply": ..., "model": ... }`.
//! POST /clear -- empties the history, replies `{ "status": "Chat cleared" }`.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user message. Absent or empty fails validation.
    #[serde(default)]
    pub message: Option<String>,
    /// Persona key; the configured default applies when absent.
    #[serde(default)]
    pub persona: Option<String>,
}

/// Successful chat response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub model: String,
}

/// POST /chat -- run one exchange through the engine.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = body.message.unwrap_or_default();
    let reply = state
        .engine
        .respond(&message, body.persona.as_deref())
        .await?;
    Ok(Json(ChatResponse {
        reply: reply.reply,
        model: reply.model,
    }))
}

/// POST /clear -- empty the history and persist the empty log.
pub async fn clear(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.engine.clear().await?;
    Ok(Json(json!({ "status": "Chat cleared" })))
}
