//! Retrieval coordinator in front of a [`StoreClient`].
//!
//! Provides the uniform entry point callers use instead of the raw store:
//! - [`Driver::get`] - single or batch lookup, misses reported as data
//! - [`Driver::upsert`], [`Driver::remove`], [`Driver::get_multi`] - direct delegations
//!
//! Every operation returns a [`Completion`], which can be awaited or given a
//! callback.
//!
//! # Basic Usage
//! ```ignore
//! use bucket_driver::{Driver, MemoryStore};
//!
//! let driver = Driver::create(MemoryStore::new());
//! driver.upsert("user:1001", serde_json::json!({"name": "Alice"})).await?;
//!
//! let doc = driver.get("user:1001").await?;
//! let batch = driver.get(vec!["user:1001", "user:1002"]).await?;
//! assert_eq!(batch.misses(), ["user:1002"]);
//!
//! driver.get("user:1001").on_complete(|result| {
//!     println!("{:?}", result.map(|doc| doc.value));
//! });
//! ```
mod batch;
mod completion;
mod request;

pub use batch::BatchGet;
pub use completion::*;
pub use request::GetRequest;

#[cfg(test)]
mod completion_test;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::constants::OUTCOME_ERROR;
use crate::constants::OUTCOME_NOT_FOUND;
use crate::constants::OUTCOME_OK;
use crate::constants::OUTCOME_REJECTED;
use crate::metrics::record_operation;
use crate::metrics::OperationTimer;
use crate::metrics::BATCH_KEYS;
use crate::metrics::BATCH_MISSES;
use crate::BatchStrategy;
use crate::Cas;
use crate::DocumentEnvelope;
use crate::Error;
use crate::Key;
use crate::KeyOutcome;
use crate::MultiFetch;
use crate::Operations;
use crate::Result;
use crate::RetrievalConfig;
use crate::StoreClient;
use crate::OPERATIONS;

/// Retrieval coordinator bound to one store client
///
/// Holds no state besides the store handle and its retrieval settings; each
/// call owns its own accumulation state, so concurrent calls never share results.
pub struct Driver<S> {
    store: Arc<S>,
    config: RetrievalConfig,
}

impl<S> Clone for Driver<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> std::fmt::Debug for Driver<S> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Driver").field("config", &self.config).finish()
    }
}

impl<S: StoreClient> Driver<S> {
    /// Operation-kind metadata, same set as the crate-level [`OPERATIONS`]
    pub const OPERATIONS: Operations = OPERATIONS;

    /// Builds a driver over `store` with default retrieval settings
    pub fn create(store: S) -> Self {
        Self::with_config(store, RetrievalConfig::default())
    }

    pub fn with_config(
        store: S,
        config: RetrievalConfig,
    ) -> Self {
        Self::from_shared(Arc::new(store), config)
    }

    /// Builds a driver over a store handle that is also used elsewhere
    pub fn from_shared(
        store: Arc<S>,
        config: RetrievalConfig,
    ) -> Self {
        debug!("create driver: {:?}", config);
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn operations(&self) -> &'static Operations {
        &OPERATIONS
    }

    /// Retrieves one document or a batch of documents
    ///
    /// # Returns
    /// - for a single key: the [`DocumentEnvelope`], or [`Error::NotFound`] if
    ///   the key has no document
    /// - for a sequence of keys: a [`BatchGet`] whose hits and misses follow
    ///   request order. A miss never fails the batch.
    ///
    /// # Errors
    /// - [`Error::Store`] with the store's error, verbatim. In a batch, the
    ///   error of the lowest request position wins.
    /// - [`Error::InvalidRequest`] for an empty key, before any store call
    pub fn get<R: GetRequest>(
        &self,
        request: R,
    ) -> Completion<R::Output> {
        request.dispatch(self)
    }

    /// Creates or replaces the document at `key`
    pub fn upsert<V: Serialize>(
        &self,
        key: &str,
        value: V,
    ) -> Completion<Cas> {
        if let Err(e) = request::validate_key(key) {
            return self.reject("upsert", e);
        }
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                return self.reject(
                    "upsert",
                    Error::InvalidRequest(format!("value for {key} is not serializable: {e}")),
                )
            }
        };

        let store = self.store.clone();
        let key = key.to_string();
        Completion::new(async move {
            let _timer = OperationTimer::start("upsert");
            let result = store.upsert(&key, value).await.map_err(Error::from);
            record_outcome("upsert", &result);
            result
        })
    }

    /// Deletes the document at `key`
    pub fn remove(
        &self,
        key: &str,
    ) -> Completion<()> {
        if let Err(e) = request::validate_key(key) {
            return self.reject("remove", e);
        }

        let store = self.store.clone();
        let key = key.to_string();
        Completion::new(async move {
            let _timer = OperationTimer::start("remove");
            let result = store.remove(&key).await.map_err(Error::from);
            record_outcome("remove", &result);
            result
        })
    }

    /// Raw bulk fetch: the store's own per-key answer, unprocessed
    pub fn get_multi<K: AsRef<str>>(
        &self,
        keys: &[K],
    ) -> Completion<MultiFetch> {
        let keys = match request::validate_keys(keys) {
            Ok(keys) => keys,
            Err(e) => return self.reject("get_multi", e),
        };

        let store = self.store.clone();
        Completion::new(async move {
            let _timer = OperationTimer::start("get_multi");
            let result = store.fetch_many(&keys).await.map_err(Error::from);
            record_outcome("get_multi", &result);
            result
        })
    }

    pub(crate) fn get_one(
        &self,
        key: Key,
    ) -> Completion<DocumentEnvelope> {
        let store = self.store.clone();
        Completion::new(async move {
            let _timer = OperationTimer::start("get");

            match store.fetch_one(&key).await {
                Ok(KeyOutcome::Found(doc)) => {
                    record_operation("get", OUTCOME_OK);
                    Ok(doc)
                }
                Ok(KeyOutcome::NotFound) => {
                    debug!("[:Driver:get] miss: {}", key);
                    record_operation("get", OUTCOME_NOT_FOUND);
                    Err(Error::NotFound(key))
                }
                Err(e) => {
                    warn!("[:Driver:get] {} failed: {:?}", key, e);
                    record_operation("get", OUTCOME_ERROR);
                    Err(e.into())
                }
            }
        })
    }

    pub(crate) fn get_batch(
        &self,
        keys: Vec<Key>,
    ) -> Completion<BatchGet> {
        if keys.is_empty() {
            debug!("[:Driver:get] empty batch");
            record_operation("get_batch", OUTCOME_OK);
            return Completion::new(async { Ok(BatchGet::default()) });
        }

        let store = self.store.clone();
        let config = self.config.clone();
        Completion::new(async move {
            let _timer = OperationTimer::start("get_batch");
            debug!(
                "[:Driver:get] batch of {} keys via {:?}",
                keys.len(),
                config.batch_strategy
            );
            BATCH_KEYS.observe(keys.len() as f64);

            let slots = match config.batch_strategy {
                BatchStrategy::Concurrent => {
                    Ok(batch::fetch_concurrent(&*store, &keys, config.max_in_flight).await)
                }
                BatchStrategy::Bulk => batch::fetch_bulk(&*store, &keys).await,
            };

            let result = slots
                .map_err(Error::from)
                .and_then(|slots| batch::assemble(keys, slots));
            match &result {
                Ok(found) => {
                    BATCH_MISSES.inc_by(found.misses().len() as u64);
                    record_operation("get_batch", OUTCOME_OK);
                }
                Err(e) => {
                    warn!("[:Driver:get] batch failed: {:?}", e);
                    record_operation("get_batch", OUTCOME_ERROR);
                }
            }
            result
        })
    }

    pub(crate) fn reject<T: Send + 'static>(
        &self,
        operation: &str,
        e: Error,
    ) -> Completion<T> {
        debug!("[:Driver:{}] rejected: {}", operation, e);
        record_operation(operation, OUTCOME_REJECTED);
        Completion::failed(e)
    }
}

fn record_outcome<T>(
    operation: &str,
    result: &Result<T>,
) {
    match result {
        Ok(_) => record_operation(operation, OUTCOME_OK),
        Err(e) => {
            warn!("[:Driver:{}] failed: {:?}", operation, e);
            record_operation(operation, OUTCOME_ERROR);
        }
    }
}
