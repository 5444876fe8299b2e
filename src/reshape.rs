//! Display reshaping: time-of-day formatting and role-specific renaming.

use crate::config::FieldNames;
use crate::error::ScheduleError;
use crate::records::{NormalizedRecord, PresentationRecord, Role};
use crate::window::parse_scheduled;

/// Characters kept from the flight identifier and the registration.
const DISPLAY_SUFFIX_LEN: usize = 3;

/// Returns copies of `records` with the scheduled time cut down to `HH:MM`,
/// read in the timestamp's own offset.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTimestamp`] if a scheduled time does not parse.
pub fn format_schedule_times(
    records: &[NormalizedRecord],
) -> Result<Vec<NormalizedRecord>, ScheduleError> {
    records
        .iter()
        .map(|record| {
            let ts = parse_scheduled(&record.scheduled)?;
            Ok(record.with_scheduled(ts.format("%H:%M").to_string()))
        })
        .collect()
}

/// Renames normalized records into presentation records for `role`.
pub fn reshape(
    records: &[NormalizedRecord],
    role: Role,
    fields: &FieldNames,
) -> Vec<PresentationRecord> {
    records
        .iter()
        .map(|record| PresentationRecord {
            role,
            flight_no: suffix(record.get(&fields.identifier).unwrap_or("")),
            airframe: suffix(record.get(&fields.airframe).unwrap_or("")),
            scheduled: record.scheduled.clone(),
            route: record.get(&fields.route).map(str::to_string),
            gate: record.get(&fields.gate).map(str::to_string),
            booked_cargo_mail: record.get(&fields.booked_cargo_mail).map(str::to_string),
        })
        .collect()
}

/// [`format_schedule_times`] followed by [`reshape`].
pub fn present(
    records: &[NormalizedRecord],
    role: Role,
    fields: &FieldNames,
) -> Result<Vec<PresentationRecord>, ScheduleError> {
    let timed = format_schedule_times(records)?;
    Ok(reshape(&timed, role, fields))
}

fn suffix(value: &str) -> String {
    let len = value.chars().count();
    value
        .chars()
        .skip(len.saturating_sub(DISPLAY_SUFFIX_LEN))
        .collect()
}
