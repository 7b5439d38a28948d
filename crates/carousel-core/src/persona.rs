//! Persona registry.
//!
//! A fixed, read-only mapping from persona key to system-prompt preset,
//! populated at process start. Lookup never mutates.

use carousel_types::error::ChatError;
use carousel_types::persona::Persona;

/// Registry of available personas with a designated default.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
    default_key: String,
}

impl PersonaRegistry {
    /// Create a registry from an ordered persona list.
    ///
    /// `default_key` is trusted to name one of the entries; `builtin()`
    /// and `set_default` are the checked paths.
    pub fn new(personas: Vec<Persona>, default_key: impl Into<String>) -> Self {
        Self {
            personas,
            default_key: default_key.into(),
        }
    }

    /// The built-in persona set, with "nonchalant" as the default.
    pub fn builtin() -> Self {
        let personas = vec![
            Persona::new(
                "nonchalant",
                "Nonchalant",
                "You are a savage, unfiltered AI with a laid-back, don’t-give-a-damn tone. Throw out brutal, no-filter replies like you’re too cool to care. Use slang, sarcasm, and hit hard—keep it short and ruthless.",
            ),
            Persona::new(
                "chalant",
                "Chalant",
                "You are an energetic, enthusiastic AI with a bold, in-your-face tone. Be intense, use exclamation points, and make every response feel urgent!",
            ),
            Persona::new(
                "gemini",
                "Gemini-Type",
                "You are a witty, clever AI with a playful, conversational vibe like Gemini. Use humor, metaphors, and keep things lively and engaging.",
            ),
        ];
        Self::new(personas, "nonchalant")
    }

    /// Look up a persona by key.
    pub fn get(&self, key: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.key == key)
    }

    /// Resolve a requested persona key, falling back to the default when
    /// none is named. Unknown keys are an error, not a silent fallback.
    pub fn get_or_default(&self, key: Option<&str>) -> Result<&Persona, ChatError> {
        let key = key.unwrap_or(&self.default_key);
        self.get(key)
            .ok_or_else(|| ChatError::UnknownPersona(key.to_string()))
    }

    /// Change the default persona. Returns false (and leaves the default
    /// untouched) when the key names no registered persona.
    pub fn set_default(&mut self, key: &str) -> bool {
        if self.get(key).is_some() {
            self.default_key = key.to_string();
            true
        } else {
            false
        }
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// All personas, in registration order.
    pub fn list(&self) -> &[Persona] {
        &self.personas
    }
}
