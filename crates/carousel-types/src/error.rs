use thiserror::Error;

use crate::llm::LlmError;

/// Errors from history persistence operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from model rotation setup.
#[derive(Debug, Error)]
pub enum RotationError {
    #[error("model rotation requires at least one model identifier")]
    Empty,
}

/// Errors surfaced by the chat engine for a single exchange.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no message provided")]
    EmptyMessage,

    #[error("unknown persona: '{0}'")]
    UnknownPersona(String),

    #[error("API credential is not configured")]
    MissingApiKey,

    #[error("model {model} failed (next candidate: {fallback})")]
    Upstream {
        /// The model whose attempt failed last.
        model: String,
        /// The model the rotator would select next.
        fallback: String,
        #[source]
        source: LlmError,
    },

    #[error(transparent)]
    History(#[from] HistoryError),
}
