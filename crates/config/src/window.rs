//! Daily work window configuration.
//!
//! This module provides the [`TimeWindowConfig`] type which describes which
//! part of each day counts as business time, and whether Saturdays and
//! Sundays count at all.
//!
//! Hours are fractional: `8.5` means 08:30. The window is half-open, so a
//! minute starting exactly at `day_end_hour` is outside it.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default start of the work day (09:00).
pub const DEFAULT_DAY_START_HOUR: f64 = 9.0;

/// Default end of the work day (17:00).
pub const DEFAULT_DAY_END_HOUR: f64 = 17.0;

/// Upper bound for both window edges.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Configuration of the daily business-hours window.
///
/// # Examples
///
/// ```
/// use tempo_config::TimeWindowConfig;
///
/// // Default configuration: 09:00-17:00, weekends excluded
/// let window = TimeWindowConfig::default();
/// assert!(!window.include_weekends);
/// assert_eq!(window.hours_per_day(), 8.0);
///
/// // Custom window
/// let window = TimeWindowConfig::new(8.5, 18.0, true);
/// assert!(window.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindowConfig {
    /// Hour of day (fractional) at which business time starts.
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: f64,

    /// Hour of day (fractional) at which business time ends, exclusive.
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: f64,

    /// Whether Saturdays and Sundays count as business days.
    #[serde(default)]
    pub include_weekends: bool,
}

fn default_day_start_hour() -> f64 {
    DEFAULT_DAY_START_HOUR
}

fn default_day_end_hour() -> f64 {
    DEFAULT_DAY_END_HOUR
}

impl Default for TimeWindowConfig {
    fn default() -> Self {
        Self {
            day_start_hour: DEFAULT_DAY_START_HOUR,
            day_end_hour: DEFAULT_DAY_END_HOUR,
            include_weekends: false,
        }
    }
}

impl TimeWindowConfig {
    /// Creates a window configuration.
    ///
    /// The values are not checked here; call [`validate`](Self::validate)
    /// or let the calculator do it.
    #[must_use]
    pub const fn new(day_start_hour: f64, day_end_hour: f64, include_weekends: bool) -> Self {
        Self {
            day_start_hour,
            day_end_hour,
            include_weekends,
        }
    }

    /// Returns the length of one business day in hours.
    #[must_use]
    pub fn hours_per_day(&self) -> f64 {
        self.day_end_hour - self.day_start_hour
    }

    /// Returns `true` if the fractional time of day lies inside the window.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempo_config::TimeWindowConfig;
    ///
    /// let window = TimeWindowConfig::default();
    /// assert!(window.contains(9.0));
    /// assert!(window.contains(16.99));
    /// assert!(!window.contains(17.0));
    /// ```
    #[must_use]
    pub fn contains(&self, time_of_day: f64) -> bool {
        time_of_day >= self.day_start_hour && time_of_day < self.day_end_hour
    }

    /// Validates the window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeWindow`] if an edge is not a finite
    /// number in `0..=24`, or if the day does not end after it starts.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("day_start_hour", self.day_start_hour),
            ("day_end_hour", self.day_end_hour),
        ] {
            if !value.is_finite() || !(0.0..=HOURS_PER_DAY).contains(&value) {
                return Err(ConfigError::InvalidTimeWindow {
                    reason: format!("{name} {value} is outside 0..=24"),
                });
            }
        }

        if self.day_end_hour <= self.day_start_hour {
            return Err(ConfigError::InvalidTimeWindow {
                reason: format!(
                    "day_end_hour {} must be after day_start_hour {}",
                    self.day_end_hour, self.day_start_hour
                ),
            });
        }

        Ok(())
    }
}
