//! Builder API for definitions, event logs and chart options.
//!
//! This module provides fluent builders plus short constructors for the
//! common state shapes, so definitions and logs can be assembled in code
//! with minimal boilerplate.

pub mod definition;
pub mod error;
pub mod history;
pub mod options;

pub use definition::DefinitionBuilder;
pub use error::BuildError;
pub use history::HistoryBuilder;
pub use options::ChartOptionsBuilder;

use crate::core::{
    ChoiceRule, ChoiceState, Definition, FailState, MapState, ParallelState, PassState, State,
    SucceedState, TaskState, WaitState,
};

/// A Task moving to `next`, or ending its graph when `next` is `None`.
///
/// # Example
///
/// ```
/// use stepchart::builder::{task, succeed, DefinitionBuilder};
///
/// let definition = DefinitionBuilder::new()
///     .start_at("Work")
///     .state("Work", task(Some("Done")))
///     .state("Done", succeed())
///     .build()
///     .unwrap();
///
/// assert_eq!(definition.get("Work").unwrap().next(), Some("Done"));
/// ```
pub fn task(next: Option<&str>) -> State {
    let (next, end) = successor(next);
    State::Task(TaskState {
        next,
        end,
        ..TaskState::default()
    })
}

/// A Pass moving to `next`, or ending its graph when `next` is `None`.
pub fn pass(next: Option<&str>) -> State {
    let (next, end) = successor(next);
    State::Pass(PassState {
        next,
        end,
        ..PassState::default()
    })
}

/// A Wait moving to `next`, or ending its graph when `next` is `None`.
pub fn wait(next: Option<&str>) -> State {
    let (next, end) = successor(next);
    State::Wait(WaitState {
        next,
        end,
        ..WaitState::default()
    })
}

pub fn succeed() -> State {
    State::Succeed(SucceedState::default())
}

pub fn fail() -> State {
    State::Fail(FailState::default())
}

/// A Parallel running `branches` side by side.
pub fn parallel(branches: Vec<Definition>, next: Option<&str>) -> State {
    let (next, end) = successor(next);
    State::Parallel(ParallelState {
        comment: None,
        branches,
        next,
        end,
    })
}

/// A Map running `iterator` once per item.
pub fn map(iterator: Definition, next: Option<&str>) -> State {
    let (next, end) = successor(next);
    State::Map(MapState {
        comment: None,
        iterator,
        items_path: None,
        max_concurrency: None,
        next,
        end,
    })
}

/// A Choice with one rule per target, in order, and an optional default.
///
/// # Example
///
/// ```
/// use stepchart::builder::choice;
///
/// let state = choice(&["Small", "Large", "Small"], Some("Unknown"));
/// assert_eq!(state.successors(), vec!["Small", "Large", "Unknown"]);
/// ```
pub fn choice(targets: &[&str], default: Option<&str>) -> State {
    State::Choice(ChoiceState {
        comment: None,
        choices: targets.iter().copied().map(ChoiceRule::to).collect(),
        default: default.map(str::to_string),
    })
}

fn successor(next: Option<&str>) -> (Option<String>, bool) {
    (next.map(str::to_string), next.is_none())
}
