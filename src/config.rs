//! Feed filter configuration.
//!
//! A [`FeedConfig`] says which operators to keep and which raw fields carry
//! the values the schedule needs. It can be stored as JSON on disk; any key
//! left out falls back to the default:
//!
//! ```json
//! {
//!   "selector_key": "AirlineIATA",
//!   "selector_values": ["FI", "SK", "AY"],
//!   "keep_fields": ["No", "OriginDestIATA", "Scheduled", "Stand", "Aircraft"]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Raw feed keys for the values the schedule is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub identifier: String,
    pub route: String,
    pub scheduled: String,
    pub gate: String,
    pub airframe: String,
    pub booked_cargo_mail: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            identifier: "No".to_string(),
            route: "OriginDestIATA".to_string(),
            scheduled: "Scheduled".to_string(),
            gate: "Stand".to_string(),
            airframe: "Aircraft".to_string(),
            booked_cargo_mail: "Booked\nCargo/Mail".to_string(),
        }
    }
}

/// Which records the normalizer keeps and which fields it projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Raw field holding the operator code.
    pub selector_key: String,
    /// Operator codes to keep.
    pub selector_values: Vec<String>,
    /// Raw fields copied into each normalized record.
    pub keep_fields: Vec<String>,
    pub fields: FieldNames,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let fields = FieldNames::default();
        Self {
            selector_key: "AirlineIATA".to_string(),
            selector_values: vec!["FI".to_string(), "SK".to_string(), "AY".to_string()],
            keep_fields: vec![
                fields.identifier.clone(),
                fields.route.clone(),
                fields.scheduled.clone(),
                fields.gate.clone(),
                fields.airframe.clone(),
            ],
            fields,
        }
    }
}

impl FeedConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{path}'"))?;
        let config: FeedConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file '{path}'"))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the config can select and project anything at all.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.selector_key.is_empty() {
            return Err(ScheduleError::InvalidInput(
                "selector key must not be empty".to_string(),
            ));
        }
        if self.keep_fields.is_empty() {
            return Err(ScheduleError::InvalidInput(
                "keep_fields must name at least one field".to_string(),
            ));
        }
        Ok(())
    }
}
