use thiserror::Error;

use crate::runtime::{ObjectKind, RaisedError};

/// Failures surfaced by the bridge.
///
/// Variants that wrap a [`RaisedError`] carry the runtime's own error,
/// taken out of the error indicator when the failure was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("allocation failed: {0}")]
    Allocation(RaisedError),

    #[error("cannot convert {found} to {expected}")]
    Conversion {
        expected: &'static str,
        found: String,
    },

    #[error("import failed: {0}")]
    Import(RaisedError),

    #[error("attribute lookup failed: {0}")]
    AttributeLookup(RaisedError),

    #[error("container access failed: {0}")]
    Index(RaisedError),

    #[error("expected a result of type '{expected}', got '{found}'")]
    TypeMismatch {
        expected: ObjectKind,
        found: ObjectKind,
    },

    #[error("evaluation failed: {0}")]
    Evaluation(RaisedError),

    #[error("a runtime is already initialized on this thread")]
    AlreadyInitialized,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BridgeError {
    /// The runtime error behind this failure, if there is one.
    pub fn raised(&self) -> Option<&RaisedError> {
        match self {
            BridgeError::Allocation(err)
            | BridgeError::Import(err)
            | BridgeError::AttributeLookup(err)
            | BridgeError::Index(err)
            | BridgeError::Evaluation(err) => Some(err),
            _ => None,
        }
    }
}
