use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::trace;

use super::Cas;
use super::DocumentEnvelope;
use super::Key;
use super::KeyOutcome;
use super::MultiFetch;
use super::StoreClient;
use super::StoreResult;
use crate::StoreError;

/// In-process document store
///
/// Every mutation bumps a store-wide counter that becomes the document's CAS.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<Key, DocumentEnvelope>>,
    last_cas: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every document
    pub fn flush(&self) {
        self.data.write().clear();
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(
        &self,
        key: &str,
    ) -> KeyOutcome {
        self.data.read().get(key).cloned().into()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn fetch_one(
        &self,
        key: &str,
    ) -> StoreResult<KeyOutcome> {
        Ok(self.lookup(key))
    }

    async fn fetch_many(
        &self,
        keys: &[Key],
    ) -> StoreResult<MultiFetch> {
        let data = self.data.read();
        Ok(keys
            .iter()
            .map(|key| (key.clone(), Ok(data.get(key).cloned().into())))
            .collect())
    }

    async fn upsert(
        &self,
        key: &str,
        value: Value,
    ) -> StoreResult<Cas> {
        let cas = Cas::new(self.last_cas.fetch_add(1, Ordering::SeqCst) + 1);
        trace!("memory upsert {} cas={}", key, cas.raw());
        self.data
            .write()
            .insert(key.to_string(), DocumentEnvelope::new(value, cas));
        Ok(cas)
    }

    async fn remove(
        &self,
        key: &str,
    ) -> StoreResult<()> {
        match self.data.write().remove(key) {
            Some(_) => Ok(()),
            None => Err(StoreError::DocumentMissing(key.to_string())),
        }
    }
}
