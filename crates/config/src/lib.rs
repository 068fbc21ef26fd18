//! Configuration management for the tempo application.
//!
//! This crate handles loading, validating, and persisting configuration:
//! the daily business-hours window and the effort store settings.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`window`]: Daily work window used by the business-hours calculator
//! - [`store`]: Effort storage key, quota, and data directory
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Local config (`./tempo.json5` or `./tempo.json`)
//! 2. User config (`~/.config/tempo/config.json5` or `~/.config/tempo/config.json`)
//! 3. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   work_window: {
//!     day_start_hour: 9,
//!     day_end_hour: 17.5,   // 17:30
//!     include_weekends: false,
//!   },
//!   store: {
//!     effort_key: "effort_hours",
//!     quota_chars: 4096,
//!   },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use tempo_config::Config;
//!
//! # async fn example() -> tempo_config::Result<()> {
//! let config = Config::load().await?;
//! println!(
//!     "Business day: {}h-{}h",
//!     config.work_window.day_start_hour, config.work_window.day_end_hour
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod store;
pub mod window;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use store::{DEFAULT_EFFORT_KEY, StoreConfig};
pub use window::TimeWindowConfig;
