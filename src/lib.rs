//! # bucket-driver
//!
//! Data-access layer in front of a document-oriented key-value store.
//!
//! The [`Driver`] offers one retrieval operation, [`Driver::get`], for both a
//! single key and an ordered batch of keys. A missing key is reported as data
//! (a miss) instead of an error in batch mode, batch results keep request
//! order no matter how the concurrent fetches complete, and every operation
//! can be awaited or completed through a callback.
//!
//! Storage itself lives behind the [`StoreClient`] trait; [`MemoryStore`] and
//! [`SledStore`] are bundled implementations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bucket_driver::{Driver, DriverConfig, SledStore};
//!
//! #[tokio::main]
//! async fn main() -> bucket_driver::Result<()> {
//!     let config = DriverConfig::new()?.validate()?;
//!     let driver = Driver::with_config(SledStore::open(&config.storage)?, config.retrieval);
//!
//!     driver.upsert("user:1001", serde_json::json!({"name": "Alice"})).await?;
//!
//!     let (hits, misses) = driver.get(["user:1001", "user:1002"]).await?.into_parts();
//!     println!("{} found, missing {:?}", hits.len(), misses);
//!     Ok(())
//! }
//! ```

mod config;
mod constants;
mod driver;
mod errors;
mod store;

pub mod metrics;

pub use self::config::*;
pub use constants::Operation;
pub use constants::Operations;
pub use constants::OPERATIONS;
pub use driver::*;
pub use errors::*;
pub use store::*;
