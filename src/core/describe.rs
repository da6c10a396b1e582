//! Descriptions returned by the workflow service.
//!
//! The service wraps a state machine's definition as an embedded JSON
//! string, and an execution's input likewise. These types decode the
//! envelopes; fetching them is left to the caller.

use super::definition::Definition;
use super::error::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// A state machine as described by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMachineDescription {
    pub state_machine_arn: String,
    pub name: String,
    /// `STANDARD` or `EXPRESS`
    #[serde(rename = "type")]
    pub machine_type: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub role_arn: Option<String>,
    /// The definition document, JSON-encoded
    pub definition: String,
}

impl StateMachineDescription {
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(|source| ParseError::Description {
            what: "state machine",
            source,
        })
    }

    /// Decode the embedded definition document.
    pub fn parse_definition(&self) -> Result<Definition, ParseError> {
        Definition::from_json(&self.definition)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Aborted,
}

/// One execution of a state machine as described by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDescription {
    pub execution_arn: String,
    pub state_machine_arn: String,
    pub name: String,
    pub status: ExecutionStatus,
    pub start_date: DateTime<Utc>,
    pub stop_date: Option<DateTime<Utc>>,
    /// The execution input, JSON-encoded
    pub input: Option<String>,
}

impl ExecutionDescription {
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(|source| ParseError::Description {
            what: "execution",
            source,
        })
    }

    /// Decode the embedded input document, if one was recorded.
    pub fn parse_input(&self) -> Result<Option<Value>, ParseError> {
        self.input
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(ParseError::ExecutionInput)
    }

    /// Wall-clock time of a finished execution.
    pub fn duration(&self) -> Option<Duration> {
        self.stop_date?
            .signed_duration_since(self.start_date)
            .to_std()
            .ok()
    }
}
