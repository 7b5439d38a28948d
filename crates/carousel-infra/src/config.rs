//! Configuration loader for Carousel.
//!
//! Reads `carousel.toml` and deserializes it into
//! [`AppConfig`]. Falls back to defaults when the file is missing or
//! malformed, so a bare checkout runs without any configuration.

use std::path::Path;

use carousel_types::config::AppConfig;

/// Load configuration from the given path.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unreadable or unparseable file: logs a warning and returns the
///   default.
/// - Otherwise: the parsed config (absent fields keep their defaults).
pub async fn load_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}
