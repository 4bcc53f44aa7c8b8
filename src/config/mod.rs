//! Configuration management for the driver.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support
//! - Environment variable overrides
mod retrieval;
mod storage;
pub use retrieval::*;
pub use storage::*;


use std::env;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Environment variable prefix, e.g. `DRIVER__RETRIEVAL__MAX_IN_FLIGHT=8`
pub(crate) const ENV_PREFIX: &str = "DRIVER";

/// Main configuration container for the driver and its bundled stores
///
/// Merged in order (later sources override earlier):
/// 1. Default values from code
/// 2. Configuration file specified by `CONFIG_PATH`
/// 3. Environment variables (highest priority)
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DriverConfig {
    /// Batch fan-out behaviour of `get`
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Bucket location and sled tuning for [`crate::SledStore`]
    #[serde(default)]
    pub storage: StorageConfig,
}

impl DriverConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Callers must call [`validate()`](Self::validate) once all overrides are applied.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("DRIVER__STORAGE__BUCKET", "sessions");
    /// let cfg = DriverConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(env_source());

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies additional overrides from a file, then the latest environment variables.
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates every section and returns the validated instance.
    pub fn validate(self) -> Result<Self> {
        self.retrieval.validate()?;
        self.storage.validate()?;
        Ok(self)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

pub(super) fn invalid(message: impl Into<String>) -> Error {
    Error::Config(ConfigError::Message(message.into()))
}
