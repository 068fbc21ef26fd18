//! Top-level tempo settings.
//!
//! [`Config`] groups the work window and the store settings, and knows where
//! to look for them on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::store::StoreConfig;
use crate::window::TimeWindowConfig;

/// Everything tempo can be configured with.
///
/// Both sections are optional in a file; missing ones take their defaults.
///
/// # Examples
///
/// ```
/// use tempo_config::{Config, StoreConfig, TimeWindowConfig};
///
/// let early_shift = Config {
///     work_window: TimeWindowConfig::new(6.0, 14.0, false),
///     store: StoreConfig::default(),
/// };
/// assert!(early_shift.validate().is_ok());
/// assert_ne!(early_shift, Config::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Business-hours window used for due-date arithmetic.
    #[serde(default)]
    pub work_window: TimeWindowConfig,

    /// Where and how effort values are stored.
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Same as [`Config::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the first config file found, or falls back to defaults.
    ///
    /// The local `./tempo.json5` / `./tempo.json` win over the user files
    /// `~/.config/tempo/config.json5` / `~/.config/tempo/config.json`.
    ///
    /// # Errors
    ///
    /// Fails if the file that was found is unreadable, is not valid JSON5,
    /// or describes an invalid configuration. A missing file is not an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tempo_config::Config;
    ///
    /// # async fn example() -> tempo_config::Result<()> {
    /// let config = Config::load().await?;
    /// println!("Work day is {} hours", config.work_window.hours_per_day());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load() -> Result<Self> {
        let Some(path) = find_config_file() else {
            return Ok(Self::default());
        };
        Self::load_from(path)
    }

    /// Reads and validates the config stored at `path`.
    ///
    /// # Errors
    ///
    /// Fails on I/O, parse, or validation errors.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let loaded: Self = read_config_file(path)?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Writes the config to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Fails if serialization or the write fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns the first section error found, work window first.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempo_config::{Config, TimeWindowConfig};
    ///
    /// let mut config = Config::default();
    /// config.work_window = TimeWindowConfig::new(17.0, 9.0, false);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.work_window.validate()?;
        self.store.validate()
    }
}
