//! Application state wiring the engine together.
//!
//! AppState pins the generic `ChatEngine` to the concrete infra
//! implementations (Groq provider, JSON file store) and is shared by
//! both CLI commands and HTTP handlers.

use std::path::Path;
use std::sync::Arc;

use secrecy::ExposeSecret;

use carousel_core::chat::ChatEngine;
use carousel_core::history::HistoryStore;
use carousel_core::persona::PersonaRegistry;
use carousel_core::rotation::ModelRotator;
use carousel_infra::config::load_config;
use carousel_infra::history::JsonFileHistoryStore;
use carousel_infra::llm::groq::GroqProvider;
use carousel_infra::llm::groq::config::groq_defaults;
use carousel_infra::secret::{API_KEY_VAR, resolve_api_key};
use carousel_types::config::AppConfig;

/// The engine generics pinned to the infra implementations.
pub type ConcreteChatEngine = ChatEngine<GroqProvider, JsonFileHistoryStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConcreteChatEngine>,
    pub config: AppConfig,
}

impl AppState {
    /// Initialize the application state: load config, resolve the
    /// credential, load persisted history, wire the engine.
    pub async fn init(config_path: &Path) -> anyhow::Result<Self> {
        let config = load_config(config_path).await;

        // A missing key degrades chat to a configuration error instead
        // of failing startup; history and CLI commands keep working.
        let provider =
            resolve_api_key().map(|key| GroqProvider::new(groq_defaults(key.expose_secret())));
        if provider.is_none() {
            tracing::warn!("{API_KEY_VAR} is not set; chat requests will return a configuration error");
        }

        let store = JsonFileHistoryStore::new(&config.history_file);
        let log = store.load().await?;

        let rotator = ModelRotator::new(config.models.clone())?;

        let mut personas = PersonaRegistry::builtin();
        if !personas.set_default(&config.default_persona) {
            tracing::warn!(
                persona = %config.default_persona,
                "configured default persona is not registered, keeping '{}'",
                personas.default_key()
            );
        }

        let engine = ChatEngine::new(provider, store, rotator, personas, log);

        Ok(Self {
            engine: Arc::new(engine),
            config,
        })
    }
}
