//! Construct categories and per-state runtime status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// The construct kind a state or event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Task,
    Parallel,
    Map,
    Choice,
    Pass,
    Fail,
    Succeed,
    Wait,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Task,
        Category::Parallel,
        Category::Map,
        Category::Choice,
        Category::Pass,
        Category::Fail,
        Category::Succeed,
        Category::Wait,
    ];

    /// The tag-name prefix events of this category carry, e.g. `Task` in
    /// `TaskStateEntered`.
    pub fn event_prefix(&self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Parallel => "Parallel",
            Self::Map => "Map",
            Self::Choice => "Choice",
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Succeed => "Succeed",
            Self::Wait => "Wait",
        }
    }

    /// Recognize a category from an event tag by its prefix.
    ///
    /// ```rust
    /// use stepchart::core::Category;
    ///
    /// assert_eq!(Category::from_event_type("MapIterationStarted"), Some(Category::Map));
    /// assert_eq!(Category::from_event_type("LambdaFunctionSucceeded"), None);
    /// ```
    pub fn from_event_type(event_type: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| event_type.starts_with(category.event_prefix()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.event_prefix().to_lowercase())
    }
}

/// Runtime status of a state within one execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
    #[default]
    NeverRun,
    /// Entered but not yet resolved
    Indeterminate,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
            Self::NeverRun => "neverrun",
            Self::Indeterminate => "indeterminate",
        }
    }

    /// Whether the state has been entered at all.
    pub fn has_run(&self) -> bool {
        !matches!(self, Self::NeverRun)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a state together with the payloads observed for it.
///
/// `input` and `output` are decoded JSON values, present only once the
/// matching entered/exited event has been seen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub status: Status,
    pub input: Option<Value>,
    pub output: Option<Value>,
    /// Timestamp of the entered event the input was taken from
    pub entered_at: Option<DateTime<Utc>>,
    /// Timestamp of the exited event the output was taken from
    pub exited_at: Option<DateTime<Utc>>,
}

impl Details {
    pub fn never_run() -> Self {
        Self::default()
    }

    /// Time between entering and exiting the state.
    ///
    /// Returns `None` until both ends have been observed, or if the log's
    /// clock went backwards.
    pub fn duration(&self) -> Option<Duration> {
        match (self.entered_at, self.exited_at) {
            (Some(entered), Some(exited)) => exited.signed_duration_since(entered).to_std().ok(),
            _ => None,
        }
    }
}
