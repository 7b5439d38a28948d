//! Application configuration shape.
//!
//! Deserialized from `carousel.toml`; every field has a default so a
//! missing or partial file still yields a runnable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Carousel front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Path of the JSON history file, overwritten wholesale on save.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,

    /// Ordered model rotation; requests cycle through these identifiers.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Persona used when a request names none.
    #[serde(default = "default_persona")]
    pub default_persona: String,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            history_file: default_history_file(),
            models: default_models(),
            default_persona: default_persona(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_history_file() -> PathBuf {
    PathBuf::from("chat_history.json")
}

fn default_models() -> Vec<String> {
    [
        "llama-3.1-8b-instant",
        "llama-3.3-70b-versatile",
        "openai/gpt-oss-20b",
        "openai/gpt-oss-120b",
        "groq/compound",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_persona() -> String {
    "nonchalant".to_string()
}
