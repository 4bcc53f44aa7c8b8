use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::invalid;
use crate::Result;

/// Location and tuning of the sled-backed bucket
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the sled database
    /// Default: ./db
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Bucket name; one sled tree per bucket
    /// Default: "default"
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Page cache size handed to sled
    /// Default: 10MB
    #[serde(default = "default_cache_capacity_bytes")]
    pub cache_capacity_bytes: u64,

    /// Background flush interval; `None` leaves flushing to sled's default
    #[serde(default = "default_flush_every_ms")]
    pub flush_every_ms: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            bucket: default_bucket(),
            cache_capacity_bytes: default_cache_capacity_bytes(),
            flush_every_ms: default_flush_every_ms(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(invalid("storage.db_path cannot be empty"));
        }
        if self.bucket.trim().is_empty() {
            return Err(invalid("storage.bucket cannot be empty"));
        }
        if self.cache_capacity_bytes == 0 {
            return Err(invalid("storage.cache_capacity_bytes must be greater than 0"));
        }
        Ok(())
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./db")
}
fn default_bucket() -> String {
    "default".to_string()
}
fn default_cache_capacity_bytes() -> u64 {
    10 * 1024 * 1024
}
fn default_flush_every_ms() -> Option<u64> {
    Some(3)
}
