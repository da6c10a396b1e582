//! Execution event log types.
//!
//! Events are linked to their logical predecessor through
//! `previousEventId`. Inside Parallel and Map constructs several events can
//! share the same predecessor, so the links form a graph rather than a list.

use super::error::ParseError;
use super::status::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of an event within one execution's log.
///
/// The service reports ids as numbers; some tools stringify them. Both
/// forms decode to the same id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => EventId(n.to_string()),
            Raw::Text(s) => EventId(s),
        })
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId(id.to_string())
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId(id.to_string())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `type` tag of an event.
///
/// Entered/exited tags are folded into one variant per direction carrying
/// the construct category. Tags this crate has no use for are kept
/// verbatim in `Other` so they can still be classified by prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    ExecutionStarted,
    ExecutionSucceeded,
    ExecutionFailed,
    StateEntered(Category),
    StateExited(Category),
    LambdaFunctionScheduled,
    LambdaFunctionStarted,
    LambdaFunctionSucceeded,
    LambdaFunctionFailed,
    ParallelStateSucceeded,
    Other(String),
}

impl EventType {
    /// The category named by the tag's prefix, if any.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::StateEntered(category) | Self::StateExited(category) => Some(*category),
            Self::ParallelStateSucceeded => Some(Category::Parallel),
            Self::Other(name) => Category::from_event_type(name),
            Self::ExecutionStarted
            | Self::ExecutionSucceeded
            | Self::ExecutionFailed
            | Self::LambdaFunctionScheduled
            | Self::LambdaFunctionStarted
            | Self::LambdaFunctionSucceeded
            | Self::LambdaFunctionFailed => None,
        }
    }

    /// Whether this tag signals that a construct finished successfully.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Self::LambdaFunctionSucceeded
                | Self::ParallelStateSucceeded
                | Self::StateExited(Category::Map)
                | Self::StateExited(Category::Choice)
                | Self::StateExited(Category::Pass)
        )
    }

    /// Whether this tag signals that a task failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::LambdaFunctionFailed)
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ExecutionStarted" => return Self::ExecutionStarted,
            "ExecutionSucceeded" => return Self::ExecutionSucceeded,
            "ExecutionFailed" => return Self::ExecutionFailed,
            "LambdaFunctionScheduled" => return Self::LambdaFunctionScheduled,
            "LambdaFunctionStarted" => return Self::LambdaFunctionStarted,
            "LambdaFunctionSucceeded" => return Self::LambdaFunctionSucceeded,
            "LambdaFunctionFailed" => return Self::LambdaFunctionFailed,
            "ParallelStateSucceeded" => return Self::ParallelStateSucceeded,
            _ => {}
        }

        for category in Category::ALL {
            match name.strip_prefix(category.event_prefix()) {
                Some("StateEntered") => return Self::StateEntered(category),
                Some("StateExited") => return Self::StateExited(category),
                _ => {}
            }
        }

        Self::Other(name)
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionStarted => f.write_str("ExecutionStarted"),
            Self::ExecutionSucceeded => f.write_str("ExecutionSucceeded"),
            Self::ExecutionFailed => f.write_str("ExecutionFailed"),
            Self::StateEntered(category) => write!(f, "{}StateEntered", category.event_prefix()),
            Self::StateExited(category) => write!(f, "{}StateExited", category.event_prefix()),
            Self::LambdaFunctionScheduled => f.write_str("LambdaFunctionScheduled"),
            Self::LambdaFunctionStarted => f.write_str("LambdaFunctionStarted"),
            Self::LambdaFunctionSucceeded => f.write_str("LambdaFunctionSucceeded"),
            Self::LambdaFunctionFailed => f.write_str("LambdaFunctionFailed"),
            Self::ParallelStateSucceeded => f.write_str("ParallelStateSucceeded"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadDetails {
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEnteredDetails {
    pub name: String,
    /// JSON-encoded state input
    pub input: Option<String>,
    pub input_details: Option<PayloadDetails>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateExitedDetails {
    pub name: String,
    /// JSON-encoded state output
    pub output: Option<String>,
    pub output_details: Option<PayloadDetails>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStartedDetails {
    pub input: Option<String>,
    pub input_details: Option<PayloadDetails>,
    pub role_arn: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaScheduledDetails {
    pub resource: Option<String>,
    pub input: Option<String>,
    pub input_details: Option<PayloadDetails>,
    pub timeout_in_seconds: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaSucceededDetails {
    pub output: Option<String>,
    pub output_details: Option<PayloadDetails>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureDetails {
    pub error: Option<String>,
    pub cause: Option<String>,
}

/// One entry of an execution's event log.
///
/// Only the details object matching `event_type` is expected to be
/// present; the typed views [`ExecutionEvent::entered`] and
/// [`ExecutionEvent::exited`] check the tag before exposing details.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionEvent {
    pub id: EventId,
    #[serde(default)]
    pub previous_event_id: Option<EventId>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_started_event_details: Option<ExecutionStartedDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_entered_event_details: Option<StateEnteredDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_exited_event_details: Option<StateExitedDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda_function_scheduled_event_details: Option<LambdaScheduledDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda_function_succeeded_event_details: Option<LambdaSucceededDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda_function_failed_event_details: Option<FailureDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_failed_event_details: Option<FailureDetails>,
}

impl ExecutionEvent {
    /// A bare event with no details attached.
    pub fn new(
        id: impl Into<EventId>,
        previous_event_id: Option<EventId>,
        timestamp: DateTime<Utc>,
        event_type: EventType,
    ) -> Self {
        Self {
            id: id.into(),
            previous_event_id,
            timestamp,
            event_type,
            execution_started_event_details: None,
            state_entered_event_details: None,
            state_exited_event_details: None,
            lambda_function_scheduled_event_details: None,
            lambda_function_succeeded_event_details: None,
            lambda_function_failed_event_details: None,
            execution_failed_event_details: None,
        }
    }

    /// View this event as a state-entered event.
    pub fn entered(&self) -> Option<Entered<'_>> {
        match (&self.event_type, &self.state_entered_event_details) {
            (EventType::StateEntered(category), Some(details)) => Some(Entered {
                event: self,
                category: *category,
                details,
            }),
            _ => None,
        }
    }

    /// View this event as a state-exited event.
    pub fn exited(&self) -> Option<Exited<'_>> {
        match (&self.event_type, &self.state_exited_event_details) {
            (EventType::StateExited(category), Some(details)) => Some(Exited {
                event: self,
                category: *category,
                details,
            }),
            _ => None,
        }
    }
}

/// A state-entered event together with its details.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entered<'a> {
    pub event: &'a ExecutionEvent,
    pub category: Category,
    pub details: &'a StateEnteredDetails,
}

impl<'a> Entered<'a> {
    pub fn name(&self) -> &'a str {
        &self.details.name
    }

    pub fn input(&self) -> Option<&'a str> {
        self.details.input.as_deref()
    }
}

/// A state-exited event together with its details.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exited<'a> {
    pub event: &'a ExecutionEvent,
    pub category: Category,
    pub details: &'a StateExitedDetails,
}

impl<'a> Exited<'a> {
    pub fn name(&self) -> &'a str {
        &self.details.name
    }

    pub fn output(&self) -> Option<&'a str> {
        self.details.output.as_deref()
    }
}

/// The event log of one execution, in log order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionHistory {
    pub events: Vec<ExecutionEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ExecutionHistory {
    pub fn new(events: Vec<ExecutionEvent>) -> Self {
        Self {
            events,
            next_token: None,
        }
    }

    /// Decode an event log from its JSON document.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(ParseError::History)
    }
}
