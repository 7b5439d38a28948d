//! API credential resolution from the environment.
//!
//! The only secret Carousel needs is the Groq API key, read once at
//! startup from `GROQ_API_KEY` and wrapped in a [`SecretString`] so it
//! never appears in Debug output or logs.

use secrecy::SecretString;

/// Environment variable holding the Groq API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Resolve the Groq API key from the environment.
///
/// Returns `None` when the variable is unset, empty, or not valid
/// Unicode; the caller degrades chat to a configuration error rather
/// than failing startup.
pub fn resolve_api_key() -> Option<SecretString> {
    resolve_from(API_KEY_VAR)
}

fn resolve_from(var: &str) -> Option<SecretString> {
    match std::env::var(var) {
        Ok(val) if !val.is_empty() => Some(SecretString::from(val)),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        // Env var exists but has invalid Unicode -- treat as unset,
        // since the key must be a valid header value anyway
        Err(std::env::VarError::NotUnicode(_)) => None,
    }
}
