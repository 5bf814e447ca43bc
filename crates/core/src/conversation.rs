//! Conversation-related types.

use telusko_chat_model::ChatMessage;

/// Represents a conversation.
///
/// The conversation is an append-only, in-memory sequence of messages
/// owned by the active session; it is dropped with the session and is
/// never persisted. Append order is the sole ordering guarantee.
#[derive(Clone, Default, Debug)]
pub struct Conversation {
    items: Vec<ChatMessage>,
}

impl Conversation {
    /// Appends a message to the end of the conversation.
    ///
    /// No validation happens here; requiring non-empty text for
    /// outgoing messages is a presentation-layer precondition.
    #[inline]
    pub fn append(&mut self, msg: ChatMessage) {
        self.items.push(msg);
    }

    /// Returns the messages in append order.
    #[inline]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.items
    }

    /// Returns the most recently appended message.
    #[inline]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.items.last()
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when no message has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
