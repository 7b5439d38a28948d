//! Conversation log and reply types.

use serde::{Deserialize, Serialize};

use crate::llm::Message;

/// The full conversation history, in conversation order.
///
/// Serde-transparent: the persisted form is a single JSON array of
/// [`Message`], matching the on-disk `chat_history.json` layout. Storage
/// is unbounded; callers slice a trailing window for prompt assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message at the end of the log.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove and return the most recent message.
    pub fn pop(&mut self) -> Option<Message> {
        self.messages.pop()
    }

    /// The trailing `n` messages (the whole log when shorter).
    pub fn window(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Drop all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// A completed exchange: the assistant's reply and the model that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub model: String,
}
