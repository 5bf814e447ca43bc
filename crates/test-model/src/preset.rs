use serde::{Deserialize, Serialize};
use telusko_chat_model::ErrorKind;

/// The scripted outcome for one send cycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// The cycle succeeds with this reply text.
    #[serde(rename = "text")]
    Text(String),
    /// The cycle fails with the given fault.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
}

impl PresetReply {
    /// Creates a successful text reply.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text(text.into())
    }

    /// Creates a failing reply with the given kind and fault message.
    #[inline]
    pub fn failure<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self::Failure(PresetFailure {
            kind,
            message: message.into(),
        })
    }
}

/// A scripted fault.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetFailure {
    /// The fault class to report.
    pub kind: ErrorKind,
    /// The user-facing fault message.
    pub message: String,
}
