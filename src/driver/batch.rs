//! Order-preserving fan-out and reassembly for batch gets.
//!
//! Every request position owns one result slot. Slots are filled by index,
//! so the order in which fetches finish never reaches the caller.

use futures::stream;
use futures::StreamExt;
use serde::Serialize;

use crate::DocumentEnvelope;
use crate::Key;
use crate::KeyOutcome;
use crate::Result;
use crate::StoreClient;
use crate::StoreError;
use crate::StoreResult;

/// Result of a batch get: documents found and keys missing, both in request order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BatchGet {
    hits: Vec<DocumentEnvelope>,
    misses: Vec<Key>,
}

impl BatchGet {
    pub fn hits(&self) -> &[DocumentEnvelope] {
        &self.hits
    }

    pub fn misses(&self) -> &[Key] {
        &self.misses
    }

    /// True when every requested key had a document
    pub fn is_complete(&self) -> bool {
        self.misses.is_empty()
    }

    /// `(hits, misses)`
    pub fn into_parts(self) -> (Vec<DocumentEnvelope>, Vec<Key>) {
        (self.hits, self.misses)
    }
}

/// One `fetch_one` per slot, at most `max_in_flight` outstanding.
///
/// Every fetch runs to completion; the output has exactly one entry per key.
pub(crate) async fn fetch_concurrent<S: StoreClient + ?Sized>(
    store: &S,
    keys: &[Key],
    max_in_flight: usize,
) -> Vec<StoreResult<KeyOutcome>> {
    let fetches: Vec<_> = keys.iter().map(|key| store.fetch_one(key)).collect();
    stream::iter(fetches)
        .buffered(max_in_flight.max(1))
        .collect()
        .await
}

/// A single `fetch_many`, read back slot by slot.
///
/// Duplicate keys read the same answer; a key the store left out of its
/// answer becomes [`StoreError::MissingOutcome`].
pub(crate) async fn fetch_bulk<S: StoreClient + ?Sized>(
    store: &S,
    keys: &[Key],
) -> StoreResult<Vec<StoreResult<KeyOutcome>>> {
    let answer = store.fetch_many(keys).await?;
    Ok(keys
        .iter()
        .map(|key| {
            answer
                .get(key)
                .cloned()
                .unwrap_or_else(|| Err(StoreError::MissingOutcome(key.clone())))
        })
        .collect())
}

/// Walks slots in request order. The lowest-index operational error fails the
/// whole batch; otherwise found documents become hits and misses keep their keys.
pub(crate) fn assemble(
    keys: Vec<Key>,
    slots: Vec<StoreResult<KeyOutcome>>,
) -> Result<BatchGet> {
    debug_assert_eq!(keys.len(), slots.len());

    let mut hits = Vec::with_capacity(keys.len());
    let mut misses = Vec::new();
    for (key, slot) in keys.into_iter().zip(slots) {
        match slot? {
            KeyOutcome::Found(doc) => hits.push(doc),
            KeyOutcome::NotFound => misses.push(key),
        }
    }
    Ok(BatchGet { hits, misses })
}
