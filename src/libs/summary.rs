//! Today-versus-average status computation.
//!
//! The status indicator compares the time tracked today with the mean daily
//! tracked time of the trailing 90 days and picks a color:
//!
//! | condition              | color  |
//! |------------------------|--------|
//! | today + 1 h < average  | red    |
//! | today < average        | orange |
//! | today == average       | blue   |
//! | today > average        | green  |
//! | either value missing   | blue   |
//!
//! Aggregation works on raw time entries: a running entry (no end) counts up
//! to `now`, today's total is clipped to the current local day, and the
//! average only counts past days that carry tracked time.

use crate::api::{TimeEntryDto, TimeTracker};
use crate::libs::formatter::{format_average, format_today};
use crate::libs::messages::Message;
use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Length of the rolling window used for the daily average.
pub const AVERAGE_WINDOW_DAYS: i64 = 90;

pub const TRACKING_GLYPH: &str = "⏱";
pub const BULLET_GLYPH: &str = "•";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Red,
    Orange,
    Blue,
    Green,
}

impl StatusColor {
    /// First matching rule wins; missing data falls back to blue.
    pub fn select(today: Option<Duration>, average: Option<Duration>) -> Self {
        let (Some(today), Some(average)) = (today, average) else {
            return StatusColor::Blue;
        };

        if today + Duration::hours(1) < average {
            StatusColor::Red
        } else if today < average {
            StatusColor::Orange
        } else if today == average {
            StatusColor::Blue
        } else {
            StatusColor::Green
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            StatusColor::Red => "#f44336",
            StatusColor::Orange => "#ff9800",
            StatusColor::Blue => "#2196f3",
            StatusColor::Green => "#4caf50",
        }
    }
}

/// What the status surface shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDisplay {
    pub text: String,
    pub tooltip: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailySummary {
    pub average: Option<Duration>,
    pub today: Option<Duration>,
}

impl DailySummary {
    pub fn new(today: Option<Duration>, average: Option<Duration>) -> Self {
        Self { average, today }
    }

    pub fn color(&self) -> StatusColor {
        StatusColor::select(self.today, self.average)
    }

    pub fn display(&self, tracking: bool) -> StatusDisplay {
        let mut text = format!("{} | {}", format_today(self.today), format_average(self.average));
        let mut tooltip = Message::StatusTooltip.to_string();
        if tracking {
            text = format!("{} {}", text, TRACKING_GLYPH);
            tooltip = format!("{} {} {}", tooltip, BULLET_GLYPH, Message::StatusTrackingSuffix);
        }

        StatusDisplay {
            text,
            tooltip,
            color: self.color().hex().to_string(),
        }
    }
}

/// Midnight of `now`'s local day, expressed in UTC.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    local_midnight(&now.timezone(), now.date_naive())
}

/// First instant of `day` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight skipped
/// by a clock change resolves to the end of the gap.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        None => {
            let before = tz.offset_from_utc_datetime(&(midnight - Duration::days(1))).fix();
            (midnight - Duration::seconds(i64::from(before.local_minus_utc()))).and_utc()
        }
    }
}

fn entry_bounds(entry: &TimeEntryDto, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = entry.time_interval.start;
    let end = entry.time_interval.end.unwrap_or(now);
    (start, end)
}

/// Time tracked between local midnight and `now`.
pub fn today_total<Tz: TimeZone>(entries: &[TimeEntryDto], now: &DateTime<Tz>) -> Duration {
    let now_utc = now.with_timezone(&Utc);
    let midnight = start_of_day(now);

    entries
        .iter()
        .map(|entry| {
            let (start, end) = entry_bounds(entry, now_utc);
            let overlap = end.min(now_utc) - start.max(midnight);
            overlap.max(Duration::zero())
        })
        .fold(Duration::zero(), |acc, d| acc + d)
}

/// Mean per-day total over the past days with tracked time; today is excluded.
///
/// Entries are split at local midnights, so time after midnight counts for
/// the day it was spent on.
pub fn daily_average<Tz: TimeZone>(entries: &[TimeEntryDto], now: &DateTime<Tz>) -> Option<Duration> {
    let tz = now.timezone();
    let today_start = start_of_day(now);
    let now_utc = now.with_timezone(&Utc);

    let mut per_day: BTreeMap<NaiveDate, Duration> = BTreeMap::new();
    for entry in entries {
        let (start, end) = entry_bounds(entry, now_utc);
        let end = end.min(today_start);

        let mut cursor = start;
        let mut day = start.with_timezone(&tz).date_naive();
        while cursor < end {
            let Some(next_day) = day.succ_opt() else {
                break;
            };
            let next_midnight = local_midnight(&tz, next_day);
            let segment_end = end.min(next_midnight);
            if segment_end > cursor {
                *per_day.entry(day).or_insert_with(Duration::zero) += segment_end - cursor;
            }
            cursor = cursor.max(segment_end);
            day = next_day;
        }
    }

    let tracked: Vec<Duration> = per_day.into_values().filter(|d| *d > Duration::zero()).collect();
    if tracked.is_empty() {
        return None;
    }
    let total = tracked.iter().fold(Duration::zero(), |acc, d| acc + *d);
    Some(total / tracked.len() as i32)
}

/// Fetches the trailing window and computes the daily average.
pub async fn fetch_average<A: TimeTracker, Tz: TimeZone>(api: &A, workspace_id: &str, now: &DateTime<Tz>) -> Result<Option<Duration>> {
    let midnight = start_of_day(now);
    let entries = api.time_entries(workspace_id, midnight - Duration::days(AVERAGE_WINDOW_DAYS), midnight).await?;
    Ok(daily_average(&entries, now))
}

/// Fetches today's entries and sums them.
pub async fn fetch_today<A: TimeTracker, Tz: TimeZone>(api: &A, workspace_id: &str, now: &DateTime<Tz>) -> Result<Duration> {
    let midnight = start_of_day(now);
    // Entries that started yesterday may still run into today.
    let entries = api.time_entries(workspace_id, midnight - Duration::days(1), now.with_timezone(&Utc)).await?;
    Ok(today_total(&entries, now))
}
