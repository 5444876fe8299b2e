//! Operator selection and field projection for raw FIDS payloads.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::FeedConfig;
use crate::error::ScheduleError;
use crate::records::NormalizedRecord;

/// Selects the configured operators from `payload`, projects each record to
/// the kept fields and sorts the result by scheduled time.
///
/// The payload is a JSON object whose first value holds the record array.
/// Kept fields that a record lacks are simply left out, except the scheduled
/// time which every selected record must carry.
///
/// # Errors
///
/// - [`ScheduleError::InvalidInput`] if the payload is not an object or the
///   config is malformed.
/// - [`ScheduleError::MissingField`] if a selected record has no scheduled time.
pub fn normalize(
    payload: &Value,
    config: &FeedConfig,
) -> Result<Vec<NormalizedRecord>, ScheduleError> {
    config.validate()?;

    let object = payload.as_object().ok_or_else(|| {
        ScheduleError::InvalidInput("feed payload must be a JSON object".to_string())
    })?;

    let Some(first) = object.values().next() else {
        return Ok(Vec::new());
    };
    let Some(items) = first.as_array() else {
        warn!("First payload value is not a record array, no records selected");
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    for raw in items.iter().filter_map(Value::as_object) {
        if !is_selected(raw, config) {
            continue;
        }
        records.push(project(raw, config)?);
    }

    // Stable, so records with the same time keep their feed order.
    records.sort_by(|a, b| a.scheduled.cmp(&b.scheduled));

    debug!(
        total = items.len(),
        selected = records.len(),
        "Feed records normalized"
    );
    Ok(records)
}

fn is_selected(raw: &Map<String, Value>, config: &FeedConfig) -> bool {
    raw.get(&config.selector_key)
        .and_then(Value::as_str)
        .is_some_and(|operator| config.selector_values.iter().any(|v| v == operator))
}

fn project(
    raw: &Map<String, Value>,
    config: &FeedConfig,
) -> Result<NormalizedRecord, ScheduleError> {
    let mut fields: BTreeMap<String, String> = config
        .keep_fields
        .iter()
        .filter_map(|key| raw.get(key).and_then(text).map(|v| (key.clone(), v)))
        .collect();

    let scheduled = fields
        .remove(&config.fields.scheduled)
        .ok_or_else(|| ScheduleError::MissingField(config.fields.scheduled.clone()))?;

    Ok(NormalizedRecord { scheduled, fields })
}

/// String form of a raw value; `null` counts as absent.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
