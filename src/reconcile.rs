//! Turnaround matching between departures and arrivals.
//!
//! A departure is paired with the first unused arrival that stood at the same
//! gate with the same airframe. Matching is strictly first-in-list; nothing
//! scores candidates by time. Pairs get priorities 1, 2, 3... in departure
//! order. Everything left over is emitted on its own, departures first, then
//! the unused arrivals in arrival order.

use tracing::debug;

use crate::error::ScheduleError;
use crate::records::{MergedRecord, PresentationRecord, Role};

/// Builds the ordered schedule from both feeds.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidInput`] if a list holds a record of the
/// wrong role.
pub fn reconcile(
    departures: &[PresentationRecord],
    arrivals: &[PresentationRecord],
) -> Result<Vec<MergedRecord>, ScheduleError> {
    check_role(departures, Role::Departure)?;
    check_role(arrivals, Role::Arrival)?;

    let mut consumed = vec![false; arrivals.len()];
    let mut merged = Vec::with_capacity(departures.len() + arrivals.len());
    let mut next_priority = 1u32;

    for departure in departures {
        let candidate = arrivals
            .iter()
            .enumerate()
            .find(|(i, arrival)| !consumed[*i] && same_aircraft(arrival, departure));

        match candidate {
            Some((i, arrival)) => {
                consumed[i] = true;
                merged.push(MergedRecord::Turnaround {
                    priority: next_priority,
                    arrival: arrival.clone(),
                    departure: departure.clone(),
                });
                next_priority += 1;
            }
            None => merged.push(MergedRecord::Unmatched(departure.clone())),
        }
    }

    merged.extend(
        arrivals
            .iter()
            .zip(&consumed)
            .filter(|(_, used)| !**used)
            .map(|(arrival, _)| MergedRecord::Unmatched(arrival.clone())),
    );

    debug!(
        departures = departures.len(),
        arrivals = arrivals.len(),
        turnarounds = next_priority - 1,
        rows = merged.len(),
        "Feeds reconciled"
    );
    Ok(merged)
}

/// Same gate and same airframe code. Two records that both lack a gate
/// count as the same gate.
fn same_aircraft(arrival: &PresentationRecord, departure: &PresentationRecord) -> bool {
    arrival.gate == departure.gate && arrival.airframe == departure.airframe
}

fn check_role(records: &[PresentationRecord], role: Role) -> Result<(), ScheduleError> {
    match records.iter().find(|r| r.role != role) {
        Some(r) => Err(ScheduleError::InvalidInput(format!(
            "flight {} is not one of the {role}",
            r.flight_no
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement(role: Role, flight_no: &str, gate: &str, airframe: &str) -> PresentationRecord {
        PresentationRecord {
            role,
            flight_no: flight_no.to_string(),
            airframe: airframe.to_string(),
            scheduled: "10:00".to_string(),
            route: None,
            gate: Some(gate.to_string()),
            booked_cargo_mail: None,
        }
    }

    fn dep(flight_no: &str, gate: &str, airframe: &str) -> PresentationRecord {
        movement(Role::Departure, flight_no, gate, airframe)
    }

    fn arr(flight_no: &str, gate: &str, airframe: &str) -> PresentationRecord {
        movement(Role::Arrival, flight_no, gate, airframe)
    }

    fn flight_numbers(rows: &[MergedRecord]) -> Vec<String> {
        rows.iter().map(MergedRecord::flight_no).collect()
    }

    #[test]
    fn test_single_match() {
        let rows = reconcile(&[dep("100", "1", "CFM")], &[arr("200", "1", "CFM")]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].flight_no(), "200-100");
        assert_eq!(rows[0].priority(), Some(1));
    }

    #[test]
    fn test_no_overlap() {
        let rows = reconcile(&[dep("100", "1", "CFM")], &[arr("200", "2", "CFM")]).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["-100", "-200"]);
        assert!(rows.iter().all(|r| r.priority().is_none()));
    }

    #[test]
    fn test_gate_alone_is_not_enough() {
        let rows = reconcile(&[dep("100", "1", "CFM")], &[arr("200", "1", "ABC")]).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["-100", "-200"]);
    }

    #[test]
    fn test_first_candidate_wins_and_is_consumed() {
        let departures = [dep("100", "1", "CFM"), dep("101", "1", "CFM")];
        let arrivals = [arr("200", "1", "CFM"), arr("201", "1", "CFM")];

        let rows = reconcile(&departures, &arrivals).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["200-100", "201-101"]);
        assert_eq!(rows[0].priority(), Some(1));
        assert_eq!(rows[1].priority(), Some(2));
    }

    #[test]
    fn test_arrival_merges_at_most_once() {
        let departures = [dep("100", "1", "CFM"), dep("101", "1", "CFM")];
        let arrivals = [arr("200", "1", "CFM")];

        let rows = reconcile(&departures, &arrivals).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["200-100", "-101"]);
        assert_eq!(rows[1].priority(), None);
    }

    #[test]
    fn test_priorities_follow_departure_order_without_gaps() {
        let departures = [
            dep("100", "1", "AAA"),
            dep("101", "9", "ZZZ"),
            dep("102", "2", "BBB"),
        ];
        let arrivals = [arr("201", "2", "BBB"), arr("200", "1", "AAA")];

        let rows = reconcile(&departures, &arrivals).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["200-100", "-101", "201-102"]);
        let priorities: Vec<_> = rows.iter().filter_map(MergedRecord::priority).collect();
        assert_eq!(priorities, vec![1, 2]);
    }

    #[test]
    fn test_leftover_arrivals_keep_arrival_order() {
        let departures = [dep("100", "2", "BBB")];
        let arrivals = [
            arr("203", "3", "CCC"),
            arr("201", "2", "BBB"),
            arr("202", "4", "DDD"),
        ];

        let rows = reconcile(&departures, &arrivals).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["201-100", "-203", "-202"]);
    }

    #[test]
    fn test_leftover_arrival_sharing_gate_with_merged_one_is_kept() {
        // Two arrivals at the same stand: only the matched one leaves the list.
        let departures = [dep("100", "5", "CFM")];
        let arrivals = [arr("200", "5", "CFM"), arr("201", "5", "XYZ")];

        let rows = reconcile(&departures, &arrivals).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["200-100", "-201"]);
    }

    #[test]
    fn test_every_record_appears_once() {
        let departures = [dep("100", "1", "AAA"), dep("101", "2", "BBB")];
        let arrivals = [arr("200", "1", "AAA"), arr("201", "3", "CCC")];

        let rows = reconcile(&departures, &arrivals).unwrap();
        let pairs = rows.iter().filter(|r| r.priority().is_some()).count();
        assert_eq!(rows.len(), departures.len() + arrivals.len() - pairs);
    }

    #[test]
    fn test_both_without_gate_match_on_airframe() {
        let mut departure = dep("100", "1", "CFM");
        departure.gate = None;
        let mut arrival = arr("200", "1", "CFM");
        arrival.gate = None;

        let rows = reconcile(&[departure], &[arrival]).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["200-100"]);
        assert_eq!(rows[0].priority(), Some(1));
    }

    #[test]
    fn test_missing_gate_on_one_side_does_not_match() {
        let departure = dep("100", "1", "CFM");
        let mut arrival = arr("200", "1", "CFM");
        arrival.gate = None;

        let rows = reconcile(&[departure], &[arrival]).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["-100", "-200"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(reconcile(&[], &[]).unwrap().is_empty());
        let rows = reconcile(&[], &[arr("200", "1", "CFM")]).unwrap();
        assert_eq!(flight_numbers(&rows), vec!["-200"]);
    }

    #[test]
    fn test_wrong_role_is_invalid_input() {
        let result = reconcile(&[arr("200", "1", "CFM")], &[]);
        assert!(matches!(result, Err(ScheduleError::InvalidInput(_))));
    }
}
