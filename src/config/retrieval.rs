use serde::Deserialize;
use serde::Serialize;

use super::invalid;
use crate::constants::DEFAULT_MAX_IN_FLIGHT;
use crate::Result;

/// How a batch `get` reaches the store
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatchStrategy {
    /// One `fetch_one` per request slot, driven concurrently
    #[default]
    Concurrent,
    /// A single `fetch_many` call for the whole request
    Bulk,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default)]
    pub batch_strategy: BatchStrategy,

    /// Upper bound of outstanding fetches per batch in `Concurrent` mode
    /// Default: 64
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            batch_strategy: BatchStrategy::default(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_in_flight == 0 {
            return Err(invalid("retrieval.max_in_flight must be greater than 0"));
        }
        Ok(())
    }
}

fn default_max_in_flight() -> usize {
    DEFAULT_MAX_IN_FLIGHT
}
