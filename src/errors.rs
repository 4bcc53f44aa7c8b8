//! Driver Error Hierarchy
//!
//! Separates the three outcomes a caller must be able to tell apart:
//! a key without a document, an operational failure reported by the store,
//! and a malformed request rejected before the store is ever contacted.

use std::time::Duration;

use config::ConfigError;
use tokio::task::JoinError;

use crate::Key;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Single-key lookup found no document
    #[error("Document not found for key: {0}")]
    NotFound(Key),

    /// Operational failure from the store, propagated verbatim
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed call shape, detected before any store call is issued
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Operation task panicked or was aborted before settling
    #[error("Background task failed: {0}")]
    TaskFailed(#[from] JoinError),

    /// Operation invoked outside a tokio runtime, nothing was started
    #[error("No tokio runtime available: {0}")]
    NoRuntime(String),
}

impl Error {
    /// True when the error means "no document for this key" rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Returns the underlying store error, if any
    pub fn as_store_error(&self) -> Option<&StoreError> {
        match self {
            Error::Store(e) => Some(e),
            _ => None,
        }
    }
}

/// Failures reported by a [`crate::StoreClient`] unrelated to key existence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Connection to the store dropped mid-operation
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// Store did not answer in time
    #[error("Operation timeout after {0:?}")]
    Timeout(Duration),

    /// Storage engine failure (server side)
    #[error("Storage engine error: {0}")]
    Engine(String),

    /// Stored bytes could not be encoded or decoded
    #[error("Encoding failure for key {key}: {message}")]
    Encoding { key: Key, message: String },

    /// Mutation targeted a document that does not exist
    #[error("Document missing for key: {0}")]
    DocumentMissing(Key),

    /// Bulk answer carried no entry for a requested key
    #[error("Store returned no outcome for key: {0}")]
    MissingOutcome(Key),
}

impl From<sled::Error> for StoreError {
    fn from(e: sled::Error) -> Self {
        StoreError::Engine(e.to_string())
    }
}
