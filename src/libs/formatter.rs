//! Human-readable duration strings for the status indicator and idle prompt.
//!
//! ## Idle durations
//!
//! Tiers use strict comparisons against the full elapsed time:
//!
//! | elapsed            | rendering               |
//! |--------------------|-------------------------|
//! | more than 1 hour   | `H hours M minutes`     |
//! | more than 1 minute | `M minutes S seconds`   |
//! | otherwise          | `S seconds`             |
//!
//! Exactly one hour therefore renders as `60 minutes 0 seconds` and exactly
//! one minute as `60 seconds`.
//!
//! ## Status durations
//!
//! Values are rounded to one decimal place and printed without trailing
//! zeros (`2 hrs`, `2.5 hrs`, `42.3 min`).
//!
//! ```rust
//! use chrono::Duration;
//! use clockin::libs::formatter::{format_idle_duration, format_today};
//!
//! assert_eq!(format_idle_duration(Duration::seconds(250)), "4 minutes 10 seconds");
//! assert_eq!(format_today(Some(Duration::minutes(90))), "1.5 hrs");
//! ```

use chrono::Duration;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Rendering used when there is no data to show.
pub const NO_DATA: &str = "0 hrs";

pub fn format_idle_duration(elapsed: Duration) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    let seconds = millis / 1000;

    if millis > MS_PER_HOUR {
        format!("{} hours {} minutes", seconds / 3600, (seconds % 3600) / 60)
    } else if millis > MS_PER_MINUTE {
        format!("{} minutes {} seconds", seconds / 60, seconds % 60)
    } else {
        format!("{} seconds", seconds)
    }
}

/// Rounds half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn as_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MS_PER_HOUR as f64
}

pub fn as_minutes(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MS_PER_MINUTE as f64
}

/// Today's total: minutes below one hour, hours otherwise.
pub fn format_today(today: Option<Duration>) -> String {
    match today {
        Some(today) if today < Duration::hours(1) => format!("{} min", round_one_decimal(as_minutes(today))),
        Some(today) => format!("{} hrs", round_one_decimal(as_hours(today))),
        None => NO_DATA.to_string(),
    }
}

/// The rolling average, always in hours.
pub fn format_average(average: Option<Duration>) -> String {
    match average {
        Some(average) => format!("{} hrs", round_one_decimal(as_hours(average))),
        None => NO_DATA.to_string(),
    }
}
