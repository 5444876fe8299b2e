//! Time-window filtering of normalized records.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use tracing::debug;

use crate::error::ScheduleError;
use crate::records::NormalizedRecord;

/// ISO-8601 layouts RFC 3339 parsing does not cover: minute precision and
/// the basic `+hhmm` offset.
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parses a feed timestamp.
///
/// RFC 3339 with an offset or `Z` is the normal form; the other ISO-8601
/// extended and basic offset forms are accepted too. A timestamp without
/// any zone is read as UTC.
pub fn parse_scheduled(value: &str) -> Result<DateTime<FixedOffset>, ScheduleError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts);
    }
    if let Some(ts) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Ok(ts);
    }

    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        })
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| ScheduleError::InvalidTimestamp(value.to_string()))
}

/// Inclusive `[start, end]` interval of absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window from ISO-8601 bound strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleError> {
        Ok(Self::new(
            parse_scheduled(start)?.with_timezone(&Utc),
            parse_scheduled(end)?.with_timezone(&Utc),
        ))
    }

    /// `[now - hours_before, now + hours_after]`.
    pub fn around(
        now: DateTime<Utc>,
        hours_before: i64,
        hours_after: i64,
    ) -> Result<Self, ScheduleError> {
        let overflow = || ScheduleError::InvalidInput("time window is out of range".to_string());

        let start = TimeDelta::try_hours(hours_before)
            .and_then(|d| now.checked_sub_signed(d))
            .ok_or_else(overflow)?;
        let end = TimeDelta::try_hours(hours_after)
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(overflow)?;
        Ok(Self::new(start, end))
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Keeps the records whose scheduled time falls inside `window`, bounds
/// included, in their original order.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTimestamp`] on the first record whose
/// scheduled time does not parse.
pub fn filter_window(
    records: &[NormalizedRecord],
    window: &TimeWindow,
) -> Result<Vec<NormalizedRecord>, ScheduleError> {
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        let scheduled = parse_scheduled(&record.scheduled)?.with_timezone(&Utc);
        if window.contains(scheduled) {
            kept.push(record.clone());
        }
    }

    debug!(
        start = %window.start,
        end = %window.end,
        total = records.len(),
        kept = kept.len(),
        "Records filtered by time window"
    );
    Ok(kept)
}
