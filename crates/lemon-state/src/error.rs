//! Error types for the state containers.

use thiserror::Error;

use crate::kv::KvError;
use lemon_core::CoreError;

/// State container errors.
///
/// A `Domain` error means the mutation was rejected and nothing changed;
/// a `Storage` error means the in-memory state changed but persisting it
/// failed (the original app had the same gap: state first, storage after).
#[derive(Debug, Error)]
pub enum StateError {
    /// A business rule rejected the mutation.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The key-value backend failed.
    #[error(transparent)]
    Storage(#[from] KvError),

    /// A persisted blob could not be encoded.
    #[error("Failed to encode state: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for StateError {
    fn from(err: serde_json::Error) -> Self {
        StateError::Encode(err.to_string())
    }
}

/// Result type alias for state container operations.
pub type StateResult<T> = Result<T, StateError>;
