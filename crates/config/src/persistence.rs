//! Configuration file reading and writing.
//!
//! Config files may be JSON5 (comments, trailing commas, unquoted keys) or
//! plain JSON; both are parsed with the JSON5 parser. Files are always
//! written back as pretty-printed JSON.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./tempo.json5` or `./tempo.json`
//! 2. User: `~/.config/tempo/config.json5` or `~/.config/tempo/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["tempo.json5", "tempo.json"];

/// Name of the application directory under the user config directory.
const APP_DIR: &str = "tempo";

/// User configuration file names, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Returns every location a configuration file may live at, in priority
/// order.
///
/// User locations are omitted when the platform config directory cannot be
/// determined.
#[must_use]
pub fn candidate_paths() -> Vec<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(PathBuf::from);
    let user = dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));
    local.chain(user).collect()
}

/// Finds the first existing configuration file among
/// [`candidate_paths`].
///
/// # Examples
///
/// ```no_run
/// use tempo_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|path| path.is_file())
}

/// Returns the path a freshly created user configuration is saved to.
///
/// # Errors
///
/// Returns [`ConfigError::NoDataDirectory`] if the platform config directory
/// cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(USER_FILE_NAMES[0]))
        .ok_or(ConfigError::NoDataDirectory)
}

/// Reads and parses a configuration file (JSON5 or JSON).
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed into `T`.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration to a file as pretty-printed JSON.
///
/// Missing parent directories are created. The content is written to a
/// sibling temporary file first and then renamed over the target, so a
/// crash never leaves a half-written config behind.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or the file
/// cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source: std::io::Error| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_string_pretty(config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let staging = path.with_extension("tmp");
    std::fs::write(&staging, content).map_err(write_error)?;
    std::fs::rename(&staging, path).map_err(write_error)
}
