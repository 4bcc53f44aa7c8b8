//! Operation-kind metadata shared by the crate root and every driver instance.
//!
//! Pure tags: callers use them to label or branch on what a mutation should do.
//! Nothing in the driver dispatches on them.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Logical kind of a document operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Upsert,
    Remove,
    Noop,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Upsert => "upsert",
            Operation::Remove => "remove",
            Operation::Noop => "noop",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named, immutable set of all operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operations {
    pub upsert: Operation,
    pub remove: Operation,
    pub noop: Operation,
}

impl Operations {
    pub const fn all(&self) -> [Operation; 3] {
        [self.upsert, self.remove, self.noop]
    }
}

pub const OPERATIONS: Operations = Operations {
    upsert: Operation::Upsert,
    remove: Operation::Remove,
    noop: Operation::Noop,
};

/// Metric label values
pub(crate) const OUTCOME_OK: &str = "ok";
pub(crate) const OUTCOME_NOT_FOUND: &str = "not_found";
pub(crate) const OUTCOME_ERROR: &str = "error";
pub(crate) const OUTCOME_REJECTED: &str = "rejected";

/// Default ceiling on concurrent fetches for one batch get
pub(crate) const DEFAULT_MAX_IN_FLIGHT: usize = 64;
