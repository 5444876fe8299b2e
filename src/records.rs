//! Record types passed between pipeline stages.

use std::collections::BTreeMap;
use std::fmt;

/// A feed record after operator selection and field projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Scheduled time; ISO-8601 until the time-formatting step, `HH:MM` after.
    pub scheduled: String,
    /// The remaining kept fields, keyed by their raw feed name.
    pub fields: BTreeMap<String, String>,
}

impl NormalizedRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Copy of this record with a different scheduled value.
    pub fn with_scheduled(&self, scheduled: String) -> Self {
        Self {
            scheduled,
            fields: self.fields.clone(),
        }
    }
}

/// Which feed a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Arrival,
    Departure,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Arrival => write!(f, "arrivals"),
            Role::Departure => write!(f, "departures"),
        }
    }
}

/// A record renamed for display.
///
/// `scheduled` and `route` surface as `Arr.`/`From` for arrivals and
/// `Dep.`/`To` for departures; the other pair is always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationRecord {
    pub role: Role,
    /// Last three characters of the flight identifier.
    pub flight_no: String,
    /// Last three characters of the registration.
    pub airframe: String,
    pub scheduled: String,
    pub route: Option<String>,
    pub gate: Option<String>,
    pub booked_cargo_mail: Option<String>,
}

impl PresentationRecord {
    pub fn arrival_time(&self) -> Option<&str> {
        (self.role == Role::Arrival).then_some(self.scheduled.as_str())
    }

    pub fn origin(&self) -> Option<&str> {
        match self.role {
            Role::Arrival => self.route.as_deref(),
            Role::Departure => None,
        }
    }

    pub fn departure_time(&self) -> Option<&str> {
        (self.role == Role::Departure).then_some(self.scheduled.as_str())
    }

    pub fn destination(&self) -> Option<&str> {
        match self.role {
            Role::Departure => self.route.as_deref(),
            Role::Arrival => None,
        }
    }

    fn airframe_code(&self) -> Option<&str> {
        Some(self.airframe.as_str())
    }

    fn gate_code(&self) -> Option<&str> {
        self.gate.as_deref()
    }

    fn booked(&self) -> Option<&str> {
        self.booked_cargo_mail.as_deref()
    }
}

/// One schedule row as produced by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedRecord {
    /// An arrival and the departure of the same aircraft from the same gate.
    Turnaround {
        priority: u32,
        arrival: PresentationRecord,
        departure: PresentationRecord,
    },
    /// A movement with no counterpart in the other feed.
    Unmatched(PresentationRecord),
}

impl MergedRecord {
    pub fn priority(&self) -> Option<u32> {
        match self {
            MergedRecord::Turnaround { priority, .. } => Some(*priority),
            MergedRecord::Unmatched(_) => None,
        }
    }

    /// `"{arrival}-{departure}"` for turnarounds, `"-{flight}"` otherwise.
    pub fn flight_no(&self) -> String {
        match self {
            MergedRecord::Turnaround {
                arrival, departure, ..
            } => format!("{}-{}", arrival.flight_no, departure.flight_no),
            MergedRecord::Unmatched(record) => format!("-{}", record.flight_no),
        }
    }

    /// Value for `column`, or `None` when the cell stays blank.
    ///
    /// On a turnaround the departure's value wins where both sides carry one.
    pub fn cell(&self, column: Column) -> Option<String> {
        let pick = |f: fn(&PresentationRecord) -> Option<&str>| -> Option<String> {
            match self {
                MergedRecord::Turnaround {
                    arrival, departure, ..
                } => f(departure).or_else(|| f(arrival)).map(str::to_string),
                MergedRecord::Unmatched(record) => f(record).map(str::to_string),
            }
        };

        match column {
            Column::Priority => self.priority().map(|p| p.to_string()),
            Column::FlightNo => Some(self.flight_no()),
            Column::Airframe => pick(PresentationRecord::airframe_code),
            Column::ArrivalTime => pick(PresentationRecord::arrival_time),
            Column::From => pick(PresentationRecord::origin),
            Column::DepartureTime => pick(PresentationRecord::departure_time),
            Column::To => pick(PresentationRecord::destination),
            Column::Gate => pick(PresentationRecord::gate_code),
            Column::BookedCargoMail => pick(PresentationRecord::booked),
            Column::PaxOff
            | Column::CargoOff
            | Column::MailOff
            | Column::PaxOn
            | Column::LeadAgents
            | Column::Radio
            | Column::Spacer
            | Column::Comments => None,
        }
    }
}

/// Sheet columns in their fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Priority,
    FlightNo,
    Airframe,
    ArrivalTime,
    From,
    DepartureTime,
    To,
    Gate,
    PaxOff,
    CargoOff,
    MailOff,
    PaxOn,
    BookedCargoMail,
    LeadAgents,
    Radio,
    Spacer,
    Comments,
}

impl Column {
    pub const ALL: [Column; 17] = [
        Column::Priority,
        Column::FlightNo,
        Column::Airframe,
        Column::ArrivalTime,
        Column::From,
        Column::DepartureTime,
        Column::To,
        Column::Gate,
        Column::PaxOff,
        Column::CargoOff,
        Column::MailOff,
        Column::PaxOn,
        Column::BookedCargoMail,
        Column::LeadAgents,
        Column::Radio,
        Column::Spacer,
        Column::Comments,
    ];

    /// Literal header text as printed on the sheet.
    pub fn header(self) -> &'static str {
        match self {
            Column::Priority => "Priority",
            Column::FlightNo => "Flight No.\nFlug",
            Column::Airframe => "A/C",
            Column::ArrivalTime => "Arr.",
            Column::From => "From",
            Column::DepartureTime => "Dep.",
            Column::To => "To",
            Column::Gate => "Gate",
            Column::PaxOff => "Pax off",
            Column::CargoOff => "Cargo off",
            Column::MailOff => "Mail off",
            Column::PaxOn => "Pax on",
            Column::BookedCargoMail => "Booked\nCargo/Mail",
            Column::LeadAgents => "Lead Agents",
            Column::Radio => "Radio",
            Column::Spacer => " ",
            Column::Comments => "Specified & Comments:",
        }
    }
}
