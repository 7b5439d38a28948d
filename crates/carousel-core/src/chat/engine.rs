//! Chat engine orchestrating a single-writer conversation.
//!
//! `ChatEngine` owns the conversation log behind a mutex, assembles the
//! windowed prompt (persona system message + trailing history), walks
//! the model rotation on transient upstream failures, and commits an
//! exchange (append user + assistant, persist) only when it succeeds.
//! The lock is held across the upstream call, so concurrent exchanges
//! serialize and the log on disk never sees interleaved writes.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};

use carousel_types::chat::{ChatReply, ConversationLog};
use carousel_types::error::ChatError;
use carousel_types::llm::{CompletionRequest, Message, SamplingParams};

use crate::history::HistoryStore;
use crate::llm::LlmProvider;
use crate::persona::PersonaRegistry;
use crate::rotation::ModelRotator;

/// How many trailing messages feed a completion request, the freshly
/// appended user message included.
pub const HISTORY_WINDOW: usize = 10;

/// Base delay before retrying on the next model; doubles per attempt.
const RETRY_BASE_DELAY_MS: u64 = 250;

/// Orchestrates exchanges between the HTTP/CLI surface and the LLM
/// provider.
///
/// Generic over `LlmProvider` and `HistoryStore` so core stays free of
/// infrastructure; the binary pins the concrete backends. The provider
/// is optional: when the API credential is unset at startup, every
/// exchange fails with a configuration error while the rest of the
/// process (history inspection, clearing) keeps working.
pub struct ChatEngine<P: LlmProvider, S: HistoryStore> {
    provider: Option<P>,
    store: S,
    rotator: ModelRotator,
    personas: PersonaRegistry,
    params: SamplingParams,
    log: Mutex<ConversationLog>,
}

impl<P: LlmProvider, S: HistoryStore> ChatEngine<P, S> {
    /// Create an engine over a previously loaded log.
    pub fn new(
        provider: Option<P>,
        store: S,
        rotator: ModelRotator,
        personas: PersonaRegistry,
        initial_log: ConversationLog,
    ) -> Self {
        Self {
            provider,
            store,
            rotator,
            personas,
            params: SamplingParams::default(),
            log: Mutex::new(initial_log),
        }
    }

    /// Run one exchange: validate, assemble the prompt, complete against
    /// the rotation, commit, and reply.
    pub async fn respond(
        &self,
        message: &str,
        persona: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let provider = self.provider.as_ref().ok_or(ChatError::MissingApiKey)?;
        let persona = self.personas.get_or_default(persona)?;

        let mut log = self.log.lock().await;
        log.push(Message::user(message));

        // Window taken after the append: the new user message is part of
        // the trailing ten.
        let window = log.window(HISTORY_WINDOW).to_vec();

        let attempts = self.rotator.len();
        let mut attempt = 0;
        loop {
            let model = self.rotator.next();
            let request = CompletionRequest::with_params(
                model.clone(),
                window.clone(),
                Some(persona.prompt.clone()),
                self.params,
            );

            match provider.complete(&request).await {
                Ok(response) => {
                    log.push(Message::assistant(response.content.clone()));
                    if let Err(err) = self.store.save(&log).await {
                        // Keep memory and disk identical: drop the
                        // uncommitted exchange.
                        log.pop();
                        log.pop();
                        return Err(err.into());
                    }
                    info!(model = %model, persona = %persona.key, turns = log.len(), "exchange completed");
                    return Ok(ChatReply {
                        reply: response.content,
                        model,
                    });
                }
                Err(err) => {
                    attempt += 1;
                    if !err.is_transient() || attempt >= attempts {
                        log.pop();
                        return Err(ChatError::Upstream {
                            model,
                            fallback: self.rotator.peek(),
                            source: err,
                        });
                    }
                    let delay =
                        Duration::from_millis(RETRY_BASE_DELAY_MS << (attempt - 1).min(4));
                    warn!(
                        model = %model,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "model failed, rotating to next"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Empty the log and persist the empty array.
    pub async fn clear(&self) -> Result<(), ChatError> {
        let mut log = self.log.lock().await;
        log.clear();
        self.store.save(&log).await?;
        info!("chat history cleared");
        Ok(())
    }

    /// Snapshot of the full conversation log.
    pub async fn transcript(&self) -> ConversationLog {
        self.log.lock().await.clone()
    }

    /// The model rotation, in order.
    pub fn models(&self) -> &[String] {
        self.rotator.models()
    }

    /// The persona registry.
    pub fn personas(&self) -> &PersonaRegistry {
        &self.personas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    use carousel_types::error::HistoryError;
    use carousel_types::llm::{CompletionResponse, LlmError, StopReason, Usage};

    /// Scripted provider: pops one queued outcome per `complete` call
    /// and records every request it sees.
    struct ScriptedProvider {
        outcomes: StdMutex<VecDeque<Result<String, LlmError>>>,
        requests: StdMutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(outcomes: Vec<Result<String, LlmError>>) -> Self {
            Self {
                outcomes: StdMutex::new(outcomes.into()),
                requests: StdMutex::new(Vec::new()),
            }
        }

        fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            let outcome = self
                .outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("default reply".to_string()));
            outcome.map(|content| CompletionResponse {
                id: "resp-1".to_string(),
                content,
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    /// In-memory store that records saved logs; optionally fails.
    #[derive(Default)]
    struct MemoryStore {
        saved: StdMutex<Vec<ConversationLog>>,
        fail_saves: bool,
    }

    impl MemoryStore {
        fn failing() -> Self {
            Self {
                saved: StdMutex::new(Vec::new()),
                fail_saves: true,
            }
        }

        fn last_saved(&self) -> Option<ConversationLog> {
            self.saved.lock().unwrap().last().cloned()
        }
    }

    impl HistoryStore for MemoryStore {
        async fn load(&self) -> Result<ConversationLog, HistoryError> {
            Ok(ConversationLog::new())
        }

        async fn save(&self, log: &ConversationLog) -> Result<(), HistoryError> {
            if self.fail_saves {
                return Err(HistoryError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only store",
                )));
            }
            self.saved.lock().unwrap().push(log.clone());
            Ok(())
        }
    }

    fn rotator(models: &[&str]) -> ModelRotator {
        ModelRotator::new(models.iter().map(|m| m.to_string()).collect()).unwrap()
    }

    fn engine(
        provider: Option<ScriptedProvider>,
        store: MemoryStore,
        models: &[&str],
    ) -> ChatEngine<ScriptedProvider, MemoryStore> {
        ChatEngine::new(
            provider,
            store,
            rotator(models),
            PersonaRegistry::builtin(),
            ConversationLog::new(),
        )
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_before_any_upstream_call() {
        let engine = engine(
            Some(ScriptedProvider::replying("unused")),
            MemoryStore::default(),
            &["m1"],
        );
        let err = engine.respond("   ", None).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
        assert!(engine.provider.as_ref().unwrap().requests().is_empty());
        assert!(engine.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_fails_every_exchange() {
        let engine = engine(None, MemoryStore::default(), &["m1"]);
        let err = engine.respond("hi", None).await.unwrap_err();
        assert!(matches!(err, ChatError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_unknown_persona_is_rejected() {
        let engine = engine(
            Some(ScriptedProvider::replying("unused")),
            MemoryStore::default(),
            &["m1"],
        );
        let err = engine.respond("hi", Some("stoic")).await.unwrap_err();
        assert!(matches!(err, ChatError::UnknownPersona(_)));
        assert!(engine.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn test_successful_exchange_commits_and_persists() {
        let engine = engine(
            Some(ScriptedProvider::replying("hello there")),
            MemoryStore::default(),
            &["llama-3.1-8b-instant", "llama-3.3-70b-versatile"],
        );

        let reply = engine.respond("hi", Some("chalant")).await.unwrap();
        assert_eq!(reply.reply, "hello there");
        assert_eq!(reply.model, "llama-3.1-8b-instant");

        let transcript = engine.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].content, "hi");
        assert_eq!(transcript.messages()[1].content, "hello there");

        // Persisted log matches the in-memory one.
        assert_eq!(engine.store.last_saved().unwrap(), transcript);
    }

    #[tokio::test]
    async fn test_prompt_uses_persona_system_message_and_ten_message_window() {
        let provider = ScriptedProvider::replying("ok");
        let mut initial = ConversationLog::new();
        for i in 0..10 {
            initial.push(Message::user(format!("old-{i}")));
        }
        let engine = ChatEngine::new(
            Some(provider),
            MemoryStore::default(),
            rotator(&["m1"]),
            PersonaRegistry::builtin(),
            initial,
        );

        engine.respond("eleventh", Some("gemini")).await.unwrap();

        let requests = engine.provider.as_ref().unwrap().requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        let gemini_prompt = engine.personas().get("gemini").unwrap().prompt.clone();
        assert_eq!(request.system.as_deref(), Some(gemini_prompt.as_str()));

        // Eleven candidates, ten kept: old-0 trimmed, the new user
        // message last.
        assert_eq!(request.messages.len(), HISTORY_WINDOW);
        assert_eq!(request.messages[0].content, "old-1");
        assert_eq!(request.messages[9].content, "eleventh");
    }

    #[tokio::test]
    async fn test_every_registered_persona_shapes_the_system_message() {
        for key in ["nonchalant", "chalant", "gemini"] {
            let engine = engine(
                Some(ScriptedProvider::replying("ok")),
                MemoryStore::default(),
                &["m1"],
            );
            engine.respond("hi", Some(key)).await.unwrap();

            let expected = engine.personas().get(key).unwrap().prompt.clone();
            let request = &engine.provider.as_ref().unwrap().requests()[0];
            assert_eq!(request.system.as_deref(), Some(expected.as_str()));
        }
    }

    #[tokio::test]
    async fn test_fixed_sampling_params() {
        let engine = engine(
            Some(ScriptedProvider::replying("ok")),
            MemoryStore::default(),
            &["m1"],
        );
        engine.respond("hi", None).await.unwrap();

        let request = &engine.provider.as_ref().unwrap().requests()[0];
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.top_p, Some(1.0));
        assert_eq!(request.max_tokens, 1024);
        assert!(!request.stream);
    }

    #[tokio::test]
    async fn test_transient_failure_rotates_to_next_model() {
        let provider = ScriptedProvider::new(vec![
            Err(LlmError::Overloaded("busy".to_string())),
            Ok("second try".to_string()),
        ]);
        let engine = engine(Some(provider), MemoryStore::default(), &["m1", "m2"]);

        let reply = engine.respond("hi", None).await.unwrap();
        assert_eq!(reply.model, "m2");
        assert_eq!(reply.reply, "second try");

        let requests = engine.provider.as_ref().unwrap().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].model, "m1");
        assert_eq!(requests[1].model, "m2");
    }

    #[tokio::test]
    async fn test_permanent_failure_does_not_retry() {
        let provider = ScriptedProvider::new(vec![Err(LlmError::AuthenticationFailed)]);
        let engine = engine(Some(provider), MemoryStore::default(), &["m1", "m2"]);

        let err = engine.respond("hi", None).await.unwrap_err();
        match err {
            ChatError::Upstream {
                model, fallback, ..
            } => {
                assert_eq!(model, "m1");
                assert_eq!(fallback, "m2");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert_eq!(engine.provider.as_ref().unwrap().requests().len(), 1);

        // Failed exchange leaves no trace in the log.
        assert!(engine.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_rotation_names_last_model_and_next_candidate() {
        let provider = ScriptedProvider::new(vec![
            Err(LlmError::Overloaded("busy".to_string())),
            Err(LlmError::Overloaded("busy".to_string())),
        ]);
        let engine = engine(Some(provider), MemoryStore::default(), &["m1", "m2"]);

        let err = engine.respond("hi", None).await.unwrap_err();
        match err {
            ChatError::Upstream {
                model, fallback, ..
            } => {
                assert_eq!(model, "m2");
                // Cursor wrapped: the next candidate is m1 again.
                assert_eq!(fallback, "m1");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert_eq!(engine.provider.as_ref().unwrap().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_save_failure_rolls_back_the_exchange() {
        let engine = engine(
            Some(ScriptedProvider::replying("lost reply")),
            MemoryStore::failing(),
            &["m1"],
        );

        let err = engine.respond("hi", None).await.unwrap_err();
        assert!(matches!(err, ChatError::History(_)));
        assert!(engine.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_persists_empty_log() {
        let engine = engine(
            Some(ScriptedProvider::replying("hello")),
            MemoryStore::default(),
            &["m1"],
        );
        engine.respond("hi", None).await.unwrap();
        assert_eq!(engine.transcript().await.len(), 2);

        engine.clear().await.unwrap();
        assert!(engine.transcript().await.is_empty());
        assert!(engine.store.last_saved().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rotation_advances_across_exchanges() {
        let provider = ScriptedProvider::new(vec![
            Ok("one".to_string()),
            Ok("two".to_string()),
            Ok("three".to_string()),
        ]);
        let engine = engine(Some(provider), MemoryStore::default(), &["m1", "m2"]);

        assert_eq!(engine.respond("a", None).await.unwrap().model, "m1");
        assert_eq!(engine.respond("b", None).await.unwrap().model, "m2");
        assert_eq!(engine.respond("c", None).await.unwrap().model, "m1");
    }
}
