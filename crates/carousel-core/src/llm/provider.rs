//! LlmProvider trait definition.
//!
//! The abstraction the chat engine calls through; implementations live
//! in carousel-infra (e.g., `GroqProvider`). Uses native async fn in
//! traits (RPITIT, Rust 2024 edition).

use carousel_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Send a single non-streaming completion request.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
