use std::pin::Pin;
use std::sync::Arc;

use telusko_chat_model::{
    ChatMessage, Completion, CompletionError, CompletionProvider,
    CompletionRequest, RoleMessage, Sender,
};
use tracing::Instrument;

use crate::conversation::Conversation;

type CompleteResult = Result<Completion, Box<dyn CompletionError>>;
type BoxedCompleteFuture =
    Pin<Box<dyn Future<Output = CompleteResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(CompletionRequest) -> BoxedCompleteFuture + Send + Sync>;

/// A wrapper around a completion provider that turns conversation
/// snapshots into role-tagged requests and provides a type-erased
/// interface for the other modules.
///
/// The system instruction is injected at construction and stays
/// constant for the lifetime of the client; it is prepended as the
/// first record of every request.
#[derive(Clone)]
pub struct CompletionClient {
    system_prompt: String,
    handler_fn: HandlerFn,
}

impl CompletionClient {
    #[inline]
    pub fn new<P: CompletionProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `CompletionClient`
        // doesn't have a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.complete(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    match fut.await {
                        Ok(completion) => Ok(completion),
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn CompletionError>)
                        }
                    }
                }
                .instrument(trace_span!("completion client req")),
            )
        });
        Self {
            system_prompt: String::new(),
            handler_fn,
        }
    }

    /// Sets the fixed system instruction.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Requests a completion for the given conversation snapshot and
    /// returns the incoming reply message.
    ///
    /// The snapshot is replayed in full on every call — the seeded
    /// greeting and prior error replies included, with no truncation
    /// or windowing. Any failure is terminal for this round trip.
    pub async fn complete(
        &self,
        conversation: &Conversation,
    ) -> Result<ChatMessage, Box<dyn CompletionError>> {
        let req = self.build_request(conversation);
        let completion = (self.handler_fn)(req).await?;
        Ok(ChatMessage::reply(completion.text))
    }

    /// Builds the role-tagged request for a snapshot: assistant
    /// messages keep the assistant role, everything else becomes a
    /// user record, and the system instruction goes first.
    pub(crate) fn build_request(
        &self,
        conversation: &Conversation,
    ) -> CompletionRequest {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(RoleMessage::System(self.system_prompt.clone()));
        messages.extend(conversation.messages().iter().map(
            |msg| match msg.sender {
                Sender::Assistant => RoleMessage::Assistant(msg.text.clone()),
                Sender::User => RoleMessage::User(msg.text.clone()),
            },
        ));
        CompletionRequest { messages }
    }
}

#[cfg(test)]
mod tests {
    use telusko_chat_model::ErrorKind;
    use telusko_chat_test_model::{PresetReply, TestProvider};

    use super::*;

    fn seeded_conversation() -> Conversation {
        let mut conversation = Conversation::default();
        conversation
            .append(ChatMessage::reply("Hi, I'm TeluskoBot! Ask me anything!"));
        conversation
    }

    #[test]
    fn test_build_request() {
        let client = CompletionClient::new(TestProvider::default())
            .with_system_prompt("Be helpful.");
        let mut conversation = seeded_conversation();
        conversation.append(ChatMessage::outgoing("What is a closure?"));

        let req = client.build_request(&conversation);
        assert_eq!(
            req.messages,
            vec![
                RoleMessage::System("Be helpful.".to_owned()),
                RoleMessage::Assistant(
                    "Hi, I'm TeluskoBot! Ask me anything!".to_owned()
                ),
                RoleMessage::User("What is a closure?".to_owned()),
            ]
        );

        // Idempotence: an unchanged snapshot yields an identical
        // request.
        assert_eq!(client.build_request(&conversation), req);
    }

    #[test]
    fn test_build_request_replays_error_replies() {
        let client = CompletionClient::new(TestProvider::default());
        let mut conversation = seeded_conversation();
        conversation.append(ChatMessage::outgoing("Hello?"));
        conversation.append(ChatMessage::error_reply("Sorry, that failed."));

        let req = client.build_request(&conversation);
        // Error replies keep their assistant role in the replayed
        // history.
        assert_eq!(
            req.messages.last(),
            Some(&RoleMessage::Assistant("Sorry, that failed.".to_owned()))
        );
    }

    #[tokio::test]
    async fn test_complete() {
        let mut provider = TestProvider::default();
        provider.add_reply(PresetReply::text("A closure is..."));

        let client = CompletionClient::new(provider);
        let mut conversation = seeded_conversation();
        conversation.append(ChatMessage::outgoing("What is a closure?"));

        for _ in 0..2 {
            let reply = client.complete(&conversation).await.unwrap();
            assert_eq!(reply, ChatMessage::reply("A closure is..."));
        }
    }

    #[tokio::test]
    async fn test_complete_error_passthrough() {
        let mut provider = TestProvider::default();
        provider
            .add_reply(PresetReply::failure(ErrorKind::Format, "bad shape"));

        let client = CompletionClient::new(provider);
        let mut conversation = seeded_conversation();
        conversation.append(ChatMessage::outgoing("Hello?"));

        let err = client.complete(&conversation).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.to_string(), "bad shape");
    }
}
