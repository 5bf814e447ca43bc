//! Core logic including the conversation store, the completion client
//! and the send cycle.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod chat;
mod client;
pub mod conversation;

pub use chat::{Chat, ChatBuilder, FALLBACK_REPLY, SendOutcome};
