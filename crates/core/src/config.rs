//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core
//! services. Request handling never reads process-wide environment variables.

use crate::constants::DEFAULT_DATA_DIR;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] if `data_dir` is empty.
    pub fn new(data_dir: PathBuf) -> ConfigResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidInput(
                "data_dir cannot be empty".into(),
            ));
        }

        Ok(Self { data_dir })
    }

    /// Root directory of the document collections.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Parse the data directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
