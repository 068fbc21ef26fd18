//! Business time elapsed between two instants.
//!
//! The calculation walks the span one minute at a time and counts the
//! minutes that fall inside the daily work window on a business day. Both
//! ends of the span are sampled, so a zero-length span counts one minute
//! when it sits inside the window.
//!
//! Hours, minutes and weekdays are read in the time zone of the instants:
//! convert to the zone the work window is meant for (usually
//! [`chrono::Local`]) before calling.
//!
//! # Cost
//!
//! Work is linear in the number of minutes spanned, about half a million
//! steps per year. That is fine for due dates days or weeks away; callers
//! dealing with multi-year spans should not call this in a hot path.
//! [`remaining_business_hours`], which takes due dates straight from the
//! host, counts at most [`MAX_LOOKAHEAD_DAYS`] ahead.

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Timelike, Utc, Weekday};
use tempo_config::{ConfigError, TimeWindowConfig};

/// Minutes in an hour, as used for hour conversions.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Returns `true` for Saturday and Sunday.
#[must_use]
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Returns the fractional hour of day of an instant, ignoring seconds.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempo_board::worktime::time_of_day;
///
/// let instant = Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 59).unwrap();
/// assert_eq!(time_of_day(&instant), 9.5);
/// ```
#[must_use]
pub fn time_of_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    f64::from(instant.hour()) + f64::from(instant.minute()) / MINUTES_PER_HOUR
}

/// Returns `true` if the minute starting at `instant` is business time.
#[must_use]
pub fn is_business_minute<Tz: TimeZone>(instant: &DateTime<Tz>, window: &TimeWindowConfig) -> bool {
    window.contains(time_of_day(instant))
        && (window.include_weekends || !is_weekend(instant.weekday()))
}

/// Counts the business minutes between `start` and `end`, both included.
///
/// Returns `0` when `end` is before `start`. Neither instant is modified.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTimeWindow`] if the window is malformed;
/// nothing is computed in that case.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempo_board::worktime::business_minutes;
/// use tempo_config::TimeWindowConfig;
///
/// let window = TimeWindowConfig::new(9.0, 17.0, false);
/// // Friday 16:00 to Monday 10:00: one hour on Friday, 09:00..=10:00 on Monday
/// let start = Utc.with_ymd_and_hms(2024, 3, 1, 16, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
///
/// assert_eq!(business_minutes(&start, &end, &window).unwrap(), 121);
/// assert_eq!(business_minutes(&end, &start, &window).unwrap(), 0);
/// ```
pub fn business_minutes<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    window: &TimeWindowConfig,
) -> Result<u64, ConfigError> {
    window.validate()?;

    if end < start {
        return Ok(0);
    }

    let step = TimeDelta::minutes(1);
    let mut cursor = start.clone();
    let mut minutes = 0;
    while cursor <= *end {
        if is_business_minute(&cursor, window) {
            minutes += 1;
        }
        match cursor.checked_add_signed(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    Ok(minutes)
}

/// Converts minutes to hours rounded to two decimals.
///
/// # Examples
///
/// ```
/// use tempo_board::worktime::minutes_to_hours;
///
/// assert_eq!(minutes_to_hours(480), 8.0);
/// assert_eq!(minutes_to_hours(121), 2.02);
/// ```
#[must_use]
pub fn minutes_to_hours(minutes: u64) -> f64 {
    (minutes as f64 / MINUTES_PER_HOUR * 100.0).round() / 100.0
}

/// Business hours between `start` and `end`, rounded to two decimals.
///
/// # Errors
///
/// Same as [`business_minutes`].
pub fn business_hours<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    window: &TimeWindowConfig,
) -> Result<f64, ConfigError> {
    business_minutes(start, end, window).map(minutes_to_hours)
}

/// How far ahead of now [`remaining_business_hours`] counts.
pub const MAX_LOOKAHEAD_DAYS: i64 = 366;

/// Business hours left until a card's due date.
///
/// Cards without a due date, or whose due date has passed, have none left.
/// The due date is converted to the zone of `now` before counting. Due
/// dates more than [`MAX_LOOKAHEAD_DAYS`] away are counted up to that
/// horizon only, which bounds the work per call.
///
/// # Errors
///
/// Same as [`business_minutes`].
pub fn remaining_business_hours<Tz: TimeZone>(
    now: &DateTime<Tz>,
    due: Option<DateTime<Utc>>,
    window: &TimeWindowConfig,
) -> Result<f64, ConfigError> {
    window.validate()?;
    let Some(due) = due else {
        return Ok(0.0);
    };

    let due = due.with_timezone(&now.timezone());
    let end = match now.clone().checked_add_signed(TimeDelta::days(MAX_LOOKAHEAD_DAYS)) {
        Some(horizon) if horizon < due => horizon,
        _ => due,
    };
    business_hours(now, &end, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        // March 2024: the 1st is a Friday, the 4th a Monday
        Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap()
    }

    fn office_hours() -> TimeWindowConfig {
        TimeWindowConfig::new(9.0, 17.0, false)
    }

    #[test]
    fn full_working_day() {
        let minutes = business_minutes(&at(4, 9, 0), &at(4, 17, 0), &office_hours()).unwrap();
        assert_eq!(minutes, 480);
        assert_eq!(minutes_to_hours(minutes), 8.0);
    }

    #[test]
    fn friday_afternoon_to_monday_morning_skips_weekend() {
        let minutes = business_minutes(&at(1, 16, 0), &at(4, 10, 0), &office_hours()).unwrap();
        // 16:00..=16:59 on Friday plus 09:00..=10:00 on Monday
        assert_eq!(minutes, 60 + 61);
    }

    #[test]
    fn weekends_count_when_included() {
        let window = TimeWindowConfig::new(9.0, 17.0, true);
        let minutes = business_minutes(&at(1, 16, 0), &at(4, 10, 0), &window).unwrap();
        assert_eq!(minutes, 60 + 480 + 480 + 61);
    }

    #[test]
    fn end_before_start_is_zero() {
        assert_eq!(
            business_minutes(&at(4, 12, 0), &at(4, 10, 0), &office_hours()).unwrap(),
            0
        );
    }

    #[test]
    fn zero_length_span() {
        let window = office_hours();
        assert_eq!(business_minutes(&at(4, 9, 0), &at(4, 9, 0), &window).unwrap(), 1);
        assert_eq!(business_minutes(&at(4, 16, 59), &at(4, 16, 59), &window).unwrap(), 1);
        assert_eq!(business_minutes(&at(4, 17, 0), &at(4, 17, 0), &window).unwrap(), 0);
        assert_eq!(business_minutes(&at(4, 8, 59), &at(4, 8, 59), &window).unwrap(), 0);
        // Saturday
        assert_eq!(business_minutes(&at(2, 10, 0), &at(2, 10, 0), &window).unwrap(), 0);
    }

    #[test]
    fn day_end_boundary_is_excluded() {
        let minutes = business_minutes(&at(4, 16, 58), &at(4, 17, 5), &office_hours()).unwrap();
        assert_eq!(minutes, 2);
    }

    #[test]
    fn fractional_window_edges() {
        let window = TimeWindowConfig::new(8.5, 12.25, false);
        let minutes = business_minutes(&at(4, 8, 0), &at(4, 13, 0), &window).unwrap();
        // 08:30..=12:14
        assert_eq!(minutes, 225);
    }

    #[test]
    fn whole_week() {
        let start = at(4, 0, 0);
        let end = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 0).unwrap();
        assert_eq!(business_minutes(&start, &end, &office_hours()).unwrap(), 5 * 480);

        let window = TimeWindowConfig::new(9.0, 17.0, true);
        assert_eq!(business_minutes(&start, &end, &window).unwrap(), 7 * 480);
    }

    #[test]
    fn seconds_offset_samples_on_start_grid() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 30).unwrap();
        let end = at(4, 9, 1);
        // 09:00:30 is sampled, 09:01:30 is past the end
        assert_eq!(business_minutes(&start, &end, &office_hours()).unwrap(), 1);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let start = at(4, 9, 0);
        let end = at(4, 11, 0);
        let (start_copy, end_copy) = (start, end);

        business_minutes(&start, &end, &office_hours()).unwrap();

        assert_eq!(start, start_copy);
        assert_eq!(end, end_copy);
    }

    #[test]
    fn invalid_window_fails_fast() {
        let window = TimeWindowConfig::new(17.0, 9.0, false);
        let result = business_minutes(&at(4, 9, 0), &at(4, 17, 0), &window);
        assert!(matches!(result, Err(ConfigError::InvalidTimeWindow { .. })));

        // Even for spans that would trivially be zero
        let result = business_minutes(&at(4, 17, 0), &at(4, 9, 0), &window);
        assert!(result.is_err());
    }

    #[test]
    fn local_time_of_the_instant_is_used() {
        let paris = FixedOffset::east_opt(2 * 3600).unwrap();
        // 07:00-08:00 UTC is 09:00-10:00 at +02:00
        let start = at(4, 7, 0).with_timezone(&paris);
        let end = at(4, 8, 0).with_timezone(&paris);
        assert_eq!(business_minutes(&start, &end, &office_hours()).unwrap(), 61);
        assert_eq!(business_minutes(&at(4, 7, 0), &at(4, 8, 0), &office_hours()).unwrap(), 0);
    }

    #[test]
    fn hours_are_rounded_to_two_decimals() {
        assert_eq!(minutes_to_hours(0), 0.0);
        assert_eq!(minutes_to_hours(1), 0.02);
        assert_eq!(minutes_to_hours(61), 1.02);
        assert_eq!(
            business_hours(&at(1, 16, 0), &at(4, 10, 0), &office_hours()).unwrap(),
            2.02
        );
    }

    #[test]
    fn remaining_hours_until_due() {
        let window = office_hours();
        assert_eq!(remaining_business_hours(&at(4, 9, 0), None, &window).unwrap(), 0.0);
        assert_eq!(
            remaining_business_hours(&at(4, 9, 0), Some(at(4, 13, 0)), &window).unwrap(),
            4.02
        );
        // Overdue
        assert_eq!(
            remaining_business_hours(&at(4, 13, 0), Some(at(4, 9, 0)), &window).unwrap(),
            0.0
        );
    }

    #[test]
    fn far_due_dates_stop_at_the_horizon() {
        let window = office_hours();
        let now = at(4, 9, 0);
        let horizon = now + TimeDelta::days(MAX_LOOKAHEAD_DAYS);
        let far = Utc.with_ymd_and_hms(2074, 3, 4, 9, 0, 0).unwrap();

        let capped = remaining_business_hours(&now, Some(far), &window).unwrap();
        assert_eq!(
            capped,
            remaining_business_hours(&now, Some(horizon), &window).unwrap()
        );
        // Roughly a year of working days
        assert!((2000.0..2200.0).contains(&capped), "{capped}");
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(Weekday::Sat));
        assert!(is_weekend(Weekday::Sun));
        assert!(!is_weekend(Weekday::Mon));
        assert!(!is_weekend(Weekday::Fri));
    }
}
