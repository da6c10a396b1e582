//! Stepchart: flowcharts of state machine definitions and their executions
//!
//! Stepchart reads a state machine definition in the Amazon States Language
//! and, optionally, the event log of one execution of it, and produces
//! Mermaid flowchart text in which every state is coloured by what happened
//! to it during that execution.
//!
//! # Core Concepts
//!
//! - **Definition**: Ordered states of a graph, with Parallel branches and
//!   Map iterators as nested graphs
//! - **History**: Correlation of an event log with state names by walking
//!   `previousEventId` links
//! - **Diagram**: Structural compilation of a definition into namespaced
//!   flowchart text
//!
//! # Example
//!
//! ```rust
//! use stepchart::core::{Definition, ExecutionHistory};
//! use stepchart::diagram::{render, ChartOptions};
//!
//! let definition = Definition::from_json(
//!     r#"{
//!         "StartAt": "Hello",
//!         "States": {
//!             "Hello": { "Type": "Task", "Resource": "arn:hello", "Next": "Done" },
//!             "Done": { "Type": "Succeed" }
//!         }
//!     }"#,
//! )
//! .unwrap();
//!
//! let log = ExecutionHistory::from_json(
//!     r#"{
//!         "events": [
//!             { "id": 1, "timestamp": "2024-01-01T00:00:00Z", "type": "ExecutionStarted",
//!               "executionStartedEventDetails": { "input": "{}" } },
//!             { "id": 2, "previousEventId": 1, "timestamp": "2024-01-01T00:00:01Z",
//!               "type": "TaskStateEntered",
//!               "stateEnteredEventDetails": { "name": "Hello", "input": "{}" } },
//!             { "id": 3, "previousEventId": 2, "timestamp": "2024-01-01T00:00:02Z",
//!               "type": "LambdaFunctionSucceeded",
//!               "lambdaFunctionSucceededEventDetails": { "output": "{}" } }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let chart = render(&definition, Some(&log), &ChartOptions::default()).unwrap();
//! assert!(chart.text.contains("style s0-Hello fill:lightgreen"));
//! assert!(chart.text.contains("style s0-Done fill:gainsboro"));
//! ```

pub mod builder;
pub mod core;
pub mod diagram;
pub mod history;
pub mod validation;

// Re-export commonly used types
pub use core::{Category, Definition, ExecutionHistory, State, Status};
pub use diagram::{compile, compile_with, render, ChartOptions, CompileError, Flowchart};
pub use history::History;
