//! HistoryStore trait definition.
//!
//! Persistence interface for the conversation log. Implementations live
//! in carousel-infra (e.g., `JsonFileHistoryStore`). Uses native async
//! fn in traits (RPITIT, Rust 2024 edition).

use carousel_types::chat::ConversationLog;
use carousel_types::error::HistoryError;

/// Trait for conversation log persistence.
pub trait HistoryStore: Send + Sync {
    /// Load the persisted log. A missing or unreadable-as-JSON store
    /// yields an empty log rather than an error.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<ConversationLog, HistoryError>> + Send;

    /// Persist the entire log, replacing whatever was stored before.
    fn save(
        &self,
        log: &ConversationLog,
    ) -> impl std::future::Future<Output = Result<(), HistoryError>> + Send;
}
