//! A completion provider for the OpenAI chat-completions API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use reqwest::{Client, header};
use telusko_chat_model::{
    Completion, CompletionError, CompletionProvider, CompletionRequest,
    ErrorKind,
};

pub use config::{OpenAIConfig, OpenAIConfigBuilder};

/// The fault text surfaced when the provider fails without a parseable
/// error message.
const GENERIC_FAILURE: &str = "Failed to get response from TeluskoBot";

/// The fault text for well-delivered responses with an unexpected
/// shape.
const INVALID_FORMAT: &str = "Invalid response format from API";

/// Error type for [`OpenAIProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

/// OpenAI chat-completions provider.
///
/// One `complete` call performs exactly one `POST` to
/// `<base_url>/chat/completions` and parses the single JSON reply.
/// There are no retries and no timeout beyond the transport defaults.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl CompletionProvider for OpenAIProvider {
    type Error = Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static
    {
        let openai_req = proto::create_request(req, &self.config);
        let resp_fut = self
            .client
            .post(format!("{}{}", self.config.base_url, "/chat/completions"))
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .json(&openai_req)
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    error!("transport failure: {err:?}");
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Network,
                    ));
                }
            };

            let status = resp.status();
            if !status.is_success() {
                // Surface the provider's own message when the error
                // body parses, otherwise fall back to a generic one.
                let message = resp
                    .json::<proto::ErrorBody>()
                    .await
                    .ok()
                    .and_then(|body| body.error)
                    .map(|detail| detail.message)
                    .unwrap_or_else(|| GENERIC_FAILURE.to_owned());
                error!("provider failure ({status}): {message}");
                return Err(Error::new(message, ErrorKind::Provider));
            }

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            let is_valid_content_type = content_type
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| m.subtype() == mime::JSON)
                .unwrap_or(false);
            if !is_valid_content_type {
                return Err(Error::new(INVALID_FORMAT, ErrorKind::Format));
            }

            // Here we got a successful response.
            let completion: proto::ChatCompletion = match resp.json().await {
                Ok(completion) => completion,
                Err(err) => {
                    error!("unparseable success body: {err:?}");
                    return Err(Error::new(INVALID_FORMAT, ErrorKind::Format));
                }
            };
            let Some(choice) = completion.choices.into_iter().next() else {
                return Err(Error::new(INVALID_FORMAT, ErrorKind::Format));
            };
            trace!("completed a request");
            Ok(Completion {
                text: choice.message.content,
            })
        }
    }
}
