//! Storage configuration.
//!
//! Controls which key the effort value is stored under, the character quota
//! the host enforces per scope, and where the file-backed store keeps its
//! data when running outside a host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tempo_protocol::DEFAULT_SCOPE_QUOTA_CHARS;

use crate::error::{ConfigError, Result};

/// Key the effort value is stored under on each card.
pub const DEFAULT_EFFORT_KEY: &str = "effort_hours";

/// Configuration for the effort store.
///
/// # Examples
///
/// ```
/// use tempo_config::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert_eq!(config.effort_key, "effort_hours");
/// assert_eq!(config.quota_chars, 4096);
/// assert!(config.data_dir.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage key holding the effort value on each card.
    #[serde(default = "default_effort_key")]
    pub effort_key: String,

    /// Maximum serialized size, in characters, of one scope's payload.
    #[serde(default = "default_quota_chars")]
    pub quota_chars: usize,

    /// Directory used by the file-backed store.
    ///
    /// Defaults to the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_effort_key() -> String {
    DEFAULT_EFFORT_KEY.to_string()
}

fn default_quota_chars() -> usize {
    DEFAULT_SCOPE_QUOTA_CHARS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            effort_key: default_effort_key(),
            quota_chars: DEFAULT_SCOPE_QUOTA_CHARS,
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// Returns the directory the file-backed store should use.
    ///
    /// This is `data_dir` if configured, else `<data dir>/tempo/store`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDirectory`] if no directory is configured
    /// and the platform data directory cannot be determined.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("tempo").join("store"))
            .ok_or(ConfigError::NoDataDirectory)
    }

    /// Validates the store configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the quota is zero.
    pub fn validate(&self) -> Result<()> {
        if self.effort_key.trim().is_empty() {
            return Err(ConfigError::InvalidStore {
                reason: "effort_key cannot be empty".to_string(),
            });
        }

        if self.quota_chars == 0 {
            return Err(ConfigError::InvalidStore {
                reason: "quota_chars must be positive".to_string(),
            });
        }

        Ok(())
    }
}
