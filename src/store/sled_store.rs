use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use super::Cas;
use super::DocumentEnvelope;
use super::Key;
use super::KeyOutcome;
use super::MultiFetch;
use super::StoreClient;
use super::StoreResult;
use crate::StorageConfig;
use crate::StoreError;

/// On-disk record of one document
#[derive(Serialize, Deserialize)]
struct StoredDocument {
    cas: u64,
    value: Vec<u8>,
}

/// Sled-backed bucket: one sled tree holds one bucket's documents
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
    pub(super) bucket: sled::Tree,
    name: String,
}

impl SledStore {
    /// Opens the database at `config.db_path` and the bucket `config.bucket`
    pub fn open(config: &StorageConfig) -> StoreResult<Self> {
        debug!("open sled bucket {} at {:?}", config.bucket, config.db_path);

        let db = sled::Config::default()
            .path(&config.db_path)
            .cache_capacity(config.cache_capacity_bytes)
            .flush_every_ms(config.flush_every_ms)
            .use_compression(true)
            .compression_factor(1)
            .open()
            .map_err(|e| {
                warn!(
                    "Try to open DB at this location: {:?} and failed: {:?}",
                    config.db_path, e
                );
                StoreError::from(e)
            })?;

        Self::open_bucket(&db, &config.bucket)
    }

    /// Opens (or creates) a named bucket inside an already opened database
    pub fn open_bucket(
        db: &sled::Db,
        name: &str,
    ) -> StoreResult<Self> {
        let bucket = db.open_tree(name)?;
        Ok(Self {
            db: db.clone(),
            bucket,
            name: name.to_string(),
        })
    }

    pub fn bucket_name(&self) -> &str {
        &self.name
    }

    /// Removes every document from the bucket and persists the empty state
    pub fn flush(&self) -> StoreResult<()> {
        debug!("flush bucket {}", self.name);
        self.bucket.clear()?;
        self.bucket.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bucket.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bucket.is_empty()
    }

    fn read(
        &self,
        key: &str,
    ) -> StoreResult<KeyOutcome> {
        match self.bucket.get(key.as_bytes())? {
            Some(bytes) => decode(key, &bytes).map(KeyOutcome::Found),
            None => Ok(KeyOutcome::NotFound),
        }
    }
}

fn encode(
    key: &str,
    cas: u64,
    value: &Value,
) -> StoreResult<Vec<u8>> {
    let value = serde_json::to_vec(value).map_err(|e| encoding_error(key, e))?;
    bincode::serialize(&StoredDocument { cas, value }).map_err(|e| encoding_error(key, e))
}

fn decode(
    key: &str,
    bytes: &[u8],
) -> StoreResult<DocumentEnvelope> {
    let stored: StoredDocument = bincode::deserialize(bytes).map_err(|e| encoding_error(key, e))?;
    let value = serde_json::from_slice(&stored.value).map_err(|e| encoding_error(key, e))?;
    Ok(DocumentEnvelope::new(value, Cas::new(stored.cas)))
}

fn encoding_error(
    key: &str,
    e: impl std::fmt::Display,
) -> StoreError {
    StoreError::Encoding {
        key: key.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl StoreClient for SledStore {
    async fn fetch_one(
        &self,
        key: &str,
    ) -> StoreResult<KeyOutcome> {
        self.read(key)
    }

    async fn fetch_many(
        &self,
        keys: &[Key],
    ) -> StoreResult<MultiFetch> {
        Ok(keys.iter().map(|key| (key.clone(), self.read(key))).collect())
    }

    async fn upsert(
        &self,
        key: &str,
        value: Value,
    ) -> StoreResult<Cas> {
        let cas = self.db.generate_id()?;
        let bytes = encode(key, cas, &value)?;
        self.bucket.insert(key.as_bytes(), bytes)?;
        Ok(Cas::new(cas))
    }

    async fn remove(
        &self,
        key: &str,
    ) -> StoreResult<()> {
        match self.bucket.remove(key.as_bytes())? {
            Some(_) => Ok(()),
            None => Err(StoreError::DocumentMissing(key.to_string())),
        }
    }
}
