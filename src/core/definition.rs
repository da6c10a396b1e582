//! State machine definitions.
//!
//! A [`Definition`] is one graph of named states. Parallel branches and Map
//! iterators are themselves definitions, so the model is recursive. The
//! states of a graph keep their declared order, which the diagram compiler
//! relies on for deterministic output.

use super::error::ParseError;
use super::status::Category;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A graph of states with a designated start state.
///
/// # Example
///
/// ```rust
/// use stepchart::core::{Category, Definition};
///
/// let definition = Definition::from_json(r#"{
///     "StartAt": "Fetch",
///     "States": {
///         "Fetch": { "Type": "Task", "Resource": "arn:fetch", "Next": "Done" },
///         "Done": { "Type": "Succeed" }
///     }
/// }"#).unwrap();
///
/// assert_eq!(definition.start_at, "Fetch");
/// assert_eq!(definition.state_names().collect::<Vec<_>>(), vec!["Fetch", "Done"]);
/// assert_eq!(definition.get("Done").unwrap().category(), Category::Succeed);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Definition {
    /// Name of the first state to run
    pub start_at: String,
    /// States in declared order
    pub states: States,
    pub comment: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub version: Option<String>,
}

impl Definition {
    /// Decode a definition from its JSON document.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(ParseError::Definition)
    }

    /// Look up a state of this graph by name.
    pub fn get(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// The state named by `StartAt`, if it exists.
    pub fn start_state(&self) -> Option<&State> {
        self.get(&self.start_at)
    }

    /// State names in declared order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.names()
    }
}

/// Ordered mapping from state name to state.
///
/// Serialized as a JSON object. Duplicate names are rejected on decode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct States(Vec<(String, State)>);

impl States {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a state, replacing any previous state of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, state: State) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = state,
            None => self.0.push((name, state)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&State> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, state)| state)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &State)> {
        self.0.iter().map(|(name, state)| (name.as_str(), state))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, State)> for States {
    fn from_iter<I: IntoIterator<Item = (N, State)>>(iter: I) -> Self {
        let mut states = States::new();
        for (name, state) in iter {
            states.insert(name, state);
        }
        states
    }
}

impl Serialize for States {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, state) in &self.0 {
            map.serialize_entry(name, state)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for States {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatesVisitor;

        impl<'de> Visitor<'de> for StatesVisitor {
            type Value = States;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of state names to states")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<States, A::Error> {
                let mut states = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, state)) = access.next_entry::<String, State>()? {
                    if states.iter().any(|(existing, _)| *existing == name) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate state name `{name}`"
                        )));
                    }
                    states.push((name, state));
                }
                Ok(States(states))
            }
        }

        deserializer.deserialize_map(StatesVisitor)
    }
}

/// One state of a definition, tagged by its `Type` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum State {
    Pass(PassState),
    Task(TaskState),
    Parallel(ParallelState),
    Map(MapState),
    Choice(ChoiceState),
    Fail(FailState),
    Succeed(SucceedState),
    Wait(WaitState),
}

impl State {
    /// The construct kind of this state.
    pub fn category(&self) -> Category {
        match self {
            Self::Pass(_) => Category::Pass,
            Self::Task(_) => Category::Task,
            Self::Parallel(_) => Category::Parallel,
            Self::Map(_) => Category::Map,
            Self::Choice(_) => Category::Choice,
            Self::Fail(_) => Category::Fail,
            Self::Succeed(_) => Category::Succeed,
            Self::Wait(_) => Category::Wait,
        }
    }

    /// The declared `Next` state. Choice, Fail and Succeed never carry one.
    pub fn next(&self) -> Option<&str> {
        match self {
            Self::Pass(s) => s.next.as_deref(),
            Self::Task(s) => s.next.as_deref(),
            Self::Parallel(s) => s.next.as_deref(),
            Self::Map(s) => s.next.as_deref(),
            Self::Wait(s) => s.next.as_deref(),
            Self::Choice(_) | Self::Fail(_) | Self::Succeed(_) => None,
        }
    }

    /// Whether the state ends its graph.
    ///
    /// Fail and Succeed are terminal by construction.
    pub fn is_end(&self) -> bool {
        match self {
            Self::Pass(s) => s.end,
            Self::Task(s) => s.end,
            Self::Parallel(s) => s.end,
            Self::Map(s) => s.end,
            Self::Wait(s) => s.end,
            Self::Choice(_) => false,
            Self::Fail(_) | Self::Succeed(_) => true,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Pass(s) => s.comment.as_deref(),
            Self::Task(s) => s.comment.as_deref(),
            Self::Parallel(s) => s.comment.as_deref(),
            Self::Map(s) => s.comment.as_deref(),
            Self::Choice(s) => s.comment.as_deref(),
            Self::Fail(s) => s.comment.as_deref(),
            Self::Succeed(s) => s.comment.as_deref(),
            Self::Wait(s) => s.comment.as_deref(),
        }
    }

    /// Every state name this state can hand control to within its graph.
    ///
    /// For a Choice this is the rule targets followed by the default,
    /// keeping only the first occurrence of each name.
    pub fn successors(&self) -> Vec<&str> {
        match self {
            Self::Choice(choice) => choice.targets(),
            other => other.next().into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PassState {
    pub comment: Option<String>,
    pub next: Option<String>,
    #[serde(default)]
    pub end: bool,
    pub result: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskState {
    pub comment: Option<String>,
    pub resource: Option<String>,
    pub next: Option<String>,
    #[serde(default)]
    pub end: bool,
    pub timeout_seconds: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParallelState {
    pub comment: Option<String>,
    /// Sub-graphs run side by side, in declared order
    pub branches: Vec<Definition>,
    pub next: Option<String>,
    #[serde(default)]
    pub end: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapState {
    pub comment: Option<String>,
    /// Sub-graph run once per item. Newer definitions call it `ItemProcessor`.
    #[serde(alias = "ItemProcessor")]
    pub iterator: Definition,
    pub items_path: Option<String>,
    pub max_concurrency: Option<u32>,
    pub next: Option<String>,
    #[serde(default)]
    pub end: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoiceState {
    pub comment: Option<String>,
    pub choices: Vec<ChoiceRule>,
    pub default: Option<String>,
}

impl ChoiceState {
    /// Rule targets in order, then the default, each name once.
    pub fn targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = Vec::new();
        let candidates = self
            .choices
            .iter()
            .map(|rule| rule.next.as_str())
            .chain(self.default.as_deref());
        for target in candidates {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        targets
    }
}

/// A single Choice rule. The comparison itself is kept as raw JSON since
/// only the target matters for the control-flow graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoiceRule {
    pub next: String,
    #[serde(flatten)]
    pub condition: Map<String, Value>,
}

impl ChoiceRule {
    pub fn to(next: impl Into<String>) -> Self {
        Self {
            next: next.into(),
            condition: Map::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailState {
    pub comment: Option<String>,
    pub error: Option<String>,
    pub cause: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SucceedState {
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaitState {
    pub comment: Option<String>,
    pub seconds: Option<u64>,
    pub timestamp: Option<String>,
    pub next: Option<String>,
    #[serde(default)]
    pub end: bool,
}
