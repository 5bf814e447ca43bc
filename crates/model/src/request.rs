/// A request to be sent to the completion provider.
///
/// This is the role-tagged form of a conversation snapshot. Building
/// one is deterministic: the same snapshot always produces an
/// identical request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompletionRequest {
    /// The input records, first one being the system instruction.
    pub messages: Vec<RoleMessage>,
}

/// A role-tagged record in a [`CompletionRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoleMessage {
    /// The system instruction.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}

/// The reply extracted from a successful provider response.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Completion {
    /// The reply text.
    pub text: String,
}
