//! Store Client boundary.
//!
//! The driver never touches storage itself: every read and mutation goes
//! through a [`StoreClient`]. Two implementations ship with the crate:
//! - [`MemoryStore`]: in-process map, used by tests and embedders
//! - [`SledStore`]: a sled-backed bucket with flush support
mod document;
mod mem_store;
mod sled_store;

pub use document::*;
pub use mem_store::*;
pub use sled_store::*;

#[cfg(test)]
mod mem_store_test;

use std::collections::HashMap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::StoreError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Native per-key answer of a bulk fetch: one entry per distinct key,
/// each either a document, a miss, or that key's own failure.
pub type MultiFetch = HashMap<Key, StoreResult<KeyOutcome>>;

/// Asynchronous document store primitives consumed by the driver.
///
/// A miss is never an error here: it is reported as [`KeyOutcome::NotFound`].
/// `Err` is reserved for operational failures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StoreClient: Send + Sync + 'static {
    /// Fetches a single document
    async fn fetch_one(
        &self,
        key: &str,
    ) -> StoreResult<KeyOutcome>;

    /// Fetches many documents in one call
    ///
    /// The outer `Err` fails the whole call; per-key failures are reported
    /// inside the map.
    async fn fetch_many(
        &self,
        keys: &[Key],
    ) -> StoreResult<MultiFetch>;

    /// Creates or replaces a document, returning its new version token
    async fn upsert(
        &self,
        key: &str,
        value: Value,
    ) -> StoreResult<Cas>;

    /// Deletes a document
    ///
    /// # Errors
    /// - [`StoreError::DocumentMissing`] if nothing is stored under `key`
    async fn remove(
        &self,
        key: &str,
    ) -> StoreResult<()>;
}
