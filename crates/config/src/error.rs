//! Configuration errors.

use std::path::PathBuf;

/// Why a configuration could not be loaded, saved, or accepted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file could not be written or moved into place.
    #[error("cannot write {path}: {source}")]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON5 or does not match the config layout.
    #[error("malformed config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// The config could not be turned into JSON.
    #[error("cannot encode config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// The daily work window is malformed.
    #[error("invalid time window: {reason}")]
    InvalidTimeWindow {
        /// What is wrong with the window.
        reason: String,
    },

    /// The store section is malformed.
    #[error("invalid store config: {reason}")]
    InvalidStore {
        /// What is wrong with the store section.
        reason: String,
    },

    /// The platform has no data directory and none was configured.
    #[error("no data directory available; set store.data_dir")]
    NoDataDirectory,
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_window_message() {
        let err = ConfigError::InvalidTimeWindow {
            reason: "day ends before it starts".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid time window: day ends before it starts"
        );
    }

    #[test]
    fn read_error_names_the_file() {
        let err = ConfigError::ReadFile {
            path: PathBuf::from("/tmp/tempo.json5"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("cannot read /tmp/tempo.json5"));
    }
}
