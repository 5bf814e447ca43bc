use serde::{Deserialize, Serialize};

/// The kind of fault that ended a round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Transport failure, no response was received.
    Network,
    /// The provider answered with a non-success status.
    Provider,
    /// The provider answered successfully but the body did not have
    /// the expected shape.
    Format,
}
