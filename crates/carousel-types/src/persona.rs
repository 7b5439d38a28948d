//! Persona types.
//!
//! A persona is a named system-prompt preset shaping the assistant's tone.
//! Personas are immutable and registered at process start.

use serde::{Deserialize, Serialize};

/// A named system-prompt preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Lookup key used in requests (e.g., "nonchalant").
    pub key: String,
    /// Display name for UI and CLI listings.
    pub name: String,
    /// The system-prompt text sent ahead of the conversation window.
    pub prompt: String,
}

impl Persona {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            prompt: prompt.into(),
        }
    }
}
