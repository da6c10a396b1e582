//! Render an Execution
//!
//! This example decodes a state machine description and the event log of
//! one of its executions, then prints the coloured flowchart.
//!
//! Key concepts:
//! - Definitions arrive embedded as a JSON string in the description
//! - Each state is coloured by what happened to it in the log
//! - Per-state details carry decoded input and output payloads
//!
//! Run with: cargo run --example render_execution

use stepchart::core::{ExecutionHistory, StateMachineDescription};
use stepchart::diagram::{render, ChartOptions};
use stepchart::history::History;

const STATE_MACHINE: &str = r#"{
    "stateMachineArn": "arn:aws:states:eu-west-1:123456789012:stateMachine:greeter",
    "name": "greeter",
    "type": "STANDARD",
    "definition": "{\"StartAt\":\"Greet\",\"States\":{\"Greet\":{\"Type\":\"Task\",\"Resource\":\"arn:greet\",\"Next\":\"Fan\"},\"Fan\":{\"Type\":\"Parallel\",\"Branches\":[{\"StartAt\":\"Email\",\"States\":{\"Email\":{\"Type\":\"Task\",\"Resource\":\"arn:email\",\"End\":true}}},{\"StartAt\":\"Sms\",\"States\":{\"Sms\":{\"Type\":\"Task\",\"Resource\":\"arn:sms\",\"End\":true}}}],\"Next\":\"Done\"},\"Done\":{\"Type\":\"Succeed\"}}}"
}"#;

const HISTORY: &str = r#"{
    "events": [
        { "id": 1, "timestamp": "2024-06-01T09:00:00Z", "type": "ExecutionStarted",
          "executionStartedEventDetails": { "input": "{\"who\":\"Ada\"}" } },
        { "id": 2, "previousEventId": 1, "timestamp": "2024-06-01T09:00:01Z", "type": "TaskStateEntered",
          "stateEnteredEventDetails": { "name": "Greet", "input": "{\"who\":\"Ada\"}" } },
        { "id": 3, "previousEventId": 2, "timestamp": "2024-06-01T09:00:02Z", "type": "LambdaFunctionSucceeded",
          "lambdaFunctionSucceededEventDetails": { "output": "\"Hello, Ada\"" } },
        { "id": 4, "previousEventId": 3, "timestamp": "2024-06-01T09:00:03Z", "type": "TaskStateExited",
          "stateExitedEventDetails": { "name": "Greet", "output": "\"Hello, Ada\"" } },
        { "id": 5, "previousEventId": 4, "timestamp": "2024-06-01T09:00:04Z", "type": "ParallelStateEntered",
          "stateEnteredEventDetails": { "name": "Fan", "input": "\"Hello, Ada\"" } },
        { "id": 6, "previousEventId": 5, "timestamp": "2024-06-01T09:00:05Z", "type": "TaskStateEntered",
          "stateEnteredEventDetails": { "name": "Email", "input": "\"Hello, Ada\"" } },
        { "id": 7, "previousEventId": 6, "timestamp": "2024-06-01T09:00:06Z", "type": "LambdaFunctionFailed",
          "lambdaFunctionFailedEventDetails": { "error": "SmtpError", "cause": "relay refused" } }
    ]
}"#;

fn main() {
    println!("=== Render Execution Example ===\n");

    let machine = StateMachineDescription::from_json(STATE_MACHINE).unwrap();
    let definition = machine.parse_definition().unwrap();
    println!("State machine: {}", machine.name);
    println!("States: {:?}\n", definition.state_names().collect::<Vec<_>>());

    let log = ExecutionHistory::from_json(HISTORY).unwrap();
    let history = History::new(&log);

    println!("Per-state status:");
    for name in ["Greet", "Fan", "Email", "Sms", "Done"] {
        let details = history.details_of(name).unwrap();
        println!(
            "  {name:<6} {:<14} input={:?} output={:?}",
            details.status.to_string(),
            details.input,
            details.output
        );
    }

    let chart = render(&definition, Some(&log), &ChartOptions::default()).unwrap();
    println!("\nFlowchart:\n{chart}");

    println!("=== Example Complete ===");
}
