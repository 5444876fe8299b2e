//! End-to-end schedule build from two parsed feed payloads.

use std::fmt;

use serde_json::Value;
use tracing::info;

use crate::config::FeedConfig;
use crate::error::ScheduleError;
use crate::normalize::normalize;
use crate::reconcile::reconcile;
use crate::records::{MergedRecord, PresentationRecord, Role};
use crate::reshape::{format_schedule_times, reshape};
use crate::window::{TimeWindow, filter_window};

/// Pipeline step, used to say where a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalize,
    Window,
    FormatTime,
    Reconcile,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Normalize => "filtering",
            Stage::Window => "filtering by timestamp",
            Stage::FormatTime => "formatting time",
            Stage::Reconcile => "merging",
        };
        f.write_str(name)
    }
}

/// A stage failure tagged with the stage and, where relevant, the feed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("error while {stage} {}: {source}", feed_label(.role))]
pub struct StageError {
    pub stage: Stage,
    pub role: Option<Role>,
    #[source]
    pub source: ScheduleError,
}

fn feed_label(role: &Option<Role>) -> String {
    role.map(|r| r.to_string()).unwrap_or_else(|| "data".to_string())
}

fn at(stage: Stage, role: Option<Role>) -> impl FnOnce(ScheduleError) -> StageError {
    move |source| StageError {
        stage,
        role,
        source,
    }
}

/// Runs one feed through normalize, window, time formatting and reshape.
///
/// Reshaping cannot fail, so errors only come from the first three steps.
pub fn prepare_feed(
    payload: &Value,
    role: Role,
    config: &FeedConfig,
    window: &TimeWindow,
) -> Result<Vec<PresentationRecord>, StageError> {
    let normalized = normalize(payload, config).map_err(at(Stage::Normalize, Some(role)))?;
    let in_window =
        filter_window(&normalized, window).map_err(at(Stage::Window, Some(role)))?;
    let timed =
        format_schedule_times(&in_window).map_err(at(Stage::FormatTime, Some(role)))?;
    Ok(reshape(&timed, role, &config.fields))
}

/// Builds the reconciled schedule from both feeds.
///
/// Stops at the first failing stage; nothing partial is returned.
pub fn build_schedule(
    arrivals: &Value,
    departures: &Value,
    config: &FeedConfig,
    window: &TimeWindow,
) -> Result<Vec<MergedRecord>, StageError> {
    let arrivals = prepare_feed(arrivals, Role::Arrival, config, window)?;
    let departures = prepare_feed(departures, Role::Departure, config, window)?;

    let schedule = reconcile(&departures, &arrivals).map_err(at(Stage::Reconcile, None))?;

    info!(
        arrivals = arrivals.len(),
        departures = departures.len(),
        rows = schedule.len(),
        "Schedule built"
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn window() -> TimeWindow {
        TimeWindow::parse("2024-01-01T06:00:00Z", "2024-01-01T18:00:00Z").unwrap()
    }

    #[test]
    fn test_prepare_feed_runs_all_steps() {
        let payload = json!({"Items": [{
            "No": "FI205",
            "AirlineIATA": "FI",
            "OriginDestIATA": "CPH",
            "Scheduled": "2024-01-01T09:30:00Z",
            "Stand": "3",
            "Aircraft": "TF-ICE"
        }]});

        let records =
            prepare_feed(&payload, Role::Arrival, &FeedConfig::default(), &window()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].flight_no, "205");
        assert_eq!(records[0].airframe, "ICE");
        assert_eq!(records[0].arrival_time(), Some("09:30"));
    }

    #[test]
    fn test_failure_names_stage_and_feed() {
        let arrivals = json!({"Items": []});
        let departures = json!({"Items": [{
            "No": "FI204",
            "AirlineIATA": "FI",
            "Scheduled": "soon"
        }]});

        let err =
            build_schedule(&arrivals, &departures, &FeedConfig::default(), &window()).unwrap_err();
        assert_eq!(err.stage, Stage::Window);
        assert_eq!(err.role, Some(Role::Departure));
        assert_eq!(
            err.to_string(),
            "error while filtering by timestamp departures: invalid timestamp 'soon'"
        );
    }

    #[test]
    fn test_non_object_payload_fails_in_normalize() {
        let err = build_schedule(
            &json!("offline"),
            &json!({"Items": []}),
            &FeedConfig::default(),
            &window(),
        )
        .unwrap_err();
        assert_eq!(err.stage, Stage::Normalize);
        assert_eq!(err.role, Some(Role::Arrival));
    }
}
