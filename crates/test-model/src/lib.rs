//! A local fake completion provider for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use telusko_chat_model::{
    Completion, CompletionError, CompletionProvider, CompletionRequest,
    ErrorKind, RoleMessage,
};
use tokio::time::sleep;

pub use preset::*;

/// The error returned by [`TestProvider`], either a scripted fault or
/// a script exhaustion.
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl CompletionError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake completion provider.
///
/// Before sending requests, you need to setup the conversation script,
/// which is how the provider should respond to each send cycle. The
/// step is selected by the number of user records in the incoming
/// request, so replaying an unchanged request deterministically yields
/// the same outcome. Requests past the end of the script fail.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy
/// memory copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestProvider {
    script: Vec<PresetReply>,
    delay: Option<Duration>,
}

impl TestProvider {
    /// Appends a scripted outcome for the next send cycle.
    #[inline]
    pub fn add_reply(&mut self, reply: PresetReply) {
        self.script.push(reply);
    }

    /// Sets an artificial delay before each outcome is produced.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }
}

impl CompletionProvider for TestProvider {
    type Error = Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static
    {
        let provider = self.clone();
        let user_turns = req
            .messages
            .iter()
            .filter(|msg| matches!(msg, RoleMessage::User(_)))
            .count();

        async move {
            if let Some(delay) = provider.delay {
                sleep(delay).await;
            }

            let step = user_turns
                .checked_sub(1)
                .and_then(|idx| provider.script.get(idx));
            let Some(step) = step else {
                return Err(Error {
                    message: "no enough steps".to_owned(),
                    kind: ErrorKind::Provider,
                });
            };

            match step {
                PresetReply::Text(text) => Ok(Completion {
                    text: text.clone(),
                }),
                PresetReply::Failure(failure) => Err(Error {
                    message: failure.message.clone(),
                    kind: failure.kind,
                }),
            }
        }
    }
}
