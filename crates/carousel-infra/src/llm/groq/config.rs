//! Configuration and defaults for the Groq provider.
//!
//! Groq speaks the OpenAI chat-completions protocol, so the provider is
//! an OpenAI-compatible client pointed at Groq's base URL.

/// Groq's OpenAI-compatible API endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for the Groq chat-completion provider.
pub struct GroqConfig {
    /// Human-readable provider name.
    pub provider_name: String,
    /// Base URL for the API.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier used when a request names none.
    pub model: String,
}

/// Groq default configuration.
///
/// Base URL: `https://api.groq.com/openai/v1`; the default model is the
/// first entry of the standard rotation.
pub fn groq_defaults(api_key: &str) -> GroqConfig {
    GroqConfig {
        provider_name: "groq".into(),
        base_url: GROQ_BASE_URL.into(),
        api_key: api_key.into(),
        model: "llama-3.1-8b-instant".into(),
    }
}
