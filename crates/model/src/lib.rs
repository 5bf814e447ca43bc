//! An abstraction layer for LLM completion providers.
//!
//! This crate establishes an unified protocol for the chat client to
//! talk to a completion provider, so that the rest of the codebase
//! never depends on a concrete provider implementation.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod message;
mod provider;
mod request;

pub use error::*;
pub use message::*;
pub use provider::*;
pub use request::*;
