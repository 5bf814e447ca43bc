use serde::{Deserialize, Serialize};

/// The party that produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    /// The end user.
    User,
    /// The assistant (including synthetic messages such as the
    /// greeting and error replies).
    Assistant,
}

/// Whether a message left the client or arrived at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Sent by the user to the provider.
    Outgoing,
    /// Received from (or synthesized on behalf of) the provider.
    Incoming,
}

/// A single message displayed in the conversation.
///
/// Messages are immutable once appended to a conversation; ordering is
/// append order and is the sole ordering guarantee.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The display text.
    pub text: String,
    /// Who produced the message.
    pub sender: Sender,
    /// Outgoing or incoming.
    pub direction: Direction,
    /// Set on synthetic replies that stand in for a failed round trip.
    /// Error replies keep their `Assistant` role when the conversation
    /// is replayed to the provider.
    pub is_error: bool,
}

impl ChatMessage {
    /// Creates an outgoing user message.
    #[inline]
    pub fn outgoing<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            direction: Direction::Outgoing,
            is_error: false,
        }
    }

    /// Creates an incoming assistant reply.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
            direction: Direction::Incoming,
            is_error: false,
        }
    }

    /// Creates a synthetic assistant reply that marks a failed round
    /// trip.
    #[inline]
    pub fn error_reply<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
            direction: Direction::Incoming,
            is_error: true,
        }
    }
}
