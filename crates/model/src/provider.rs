use std::error::Error;

use crate::error::ErrorKind;
use crate::request::{Completion, CompletionRequest};

/// The error type for a completion provider.
///
/// The `Display` output is the user-facing fault message that ends up
/// in the error banner.
pub trait CompletionError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a completion provider, which turns one
/// conversation snapshot into one reply.
///
/// Once the provider is created, it should behave like a stateless
/// object. It can still have internal state, but callers should not
/// rely on it, and the provider should be prepared for being dropped
/// anytime. Each `complete` call performs exactly one outbound
/// request; there are no retries at this layer.
pub trait CompletionProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: CompletionError;

    /// Requests a completion for the given snapshot.
    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static;
}
