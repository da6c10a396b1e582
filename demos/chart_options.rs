//! Chart Options
//!
//! This example builds a definition and an event log in code and renders
//! them with custom options.
//!
//! Key concepts:
//! - Fluent builders for definitions, logs and options
//! - Dangling references are all reported before anything is drawn
//! - Direction, fills and click callbacks are configurable
//!
//! Run with: cargo run --example chart_options

use stepchart::builder::{
    choice, fail, map, succeed, task, ChartOptionsBuilder, DefinitionBuilder, HistoryBuilder,
};
use stepchart::core::{Category, Status};
use stepchart::diagram::{compile_with, CompileError, Direction};
use stepchart::history::History;

fn main() {
    println!("=== Chart Options Example ===\n");

    // Example 1: A definition with a Map and a Choice
    let item = DefinitionBuilder::new()
        .start_at("Resize")
        .state("Resize", task(None))
        .build()
        .unwrap();

    let definition = DefinitionBuilder::new()
        .start_at("Check")
        .state("Check", choice(&["Thumbnails", "Reject"], Some("Thumbnails")))
        .state("Thumbnails", map(item, Some("Done")))
        .state("Reject", fail())
        .state("Done", succeed())
        .comment("image pipeline")
        .build()
        .unwrap();

    let log = HistoryBuilder::new()
        .execution_started("{}")
        .entered(Category::Choice, "Check", "{}")
        .exited(Category::Choice, "Check", "{}")
        .entered(Category::Map, "Thumbnails", "[1, 2]")
        .entered(Category::Task, "Resize", "1")
        .lambda_succeeded("\"small-1\"")
        .build();
    let history = History::new(&log);

    // Example 2: Left-to-right with custom fills and click callbacks
    println!("Example 2: Custom options");
    let options = ChartOptionsBuilder::new()
        .direction(Direction::LeftToRight)
        .fill(Status::Success, "#9f9")
        .fill(Status::Indeterminate, "#ffd966")
        .tooltips(true)
        .build()
        .unwrap();

    let chart = compile_with(&definition, Some(&history), &options).unwrap();
    println!("{chart}");
    println!("Nodes registered: {}\n", chart.context.states().count());

    // Example 3: Invalid fills are rejected by the builder
    println!("Example 3: Invalid fill");
    match ChartOptionsBuilder::new().fill(Status::Fail, "dark red").build() {
        Ok(_) => println!("  Unexpectedly accepted"),
        Err(e) => println!("  Rejected: {e}\n"),
    }

    // Example 4: Dangling references
    println!("Example 4: Dangling references");
    let broken = DefinitionBuilder::new()
        .start_at("Start")
        .state("A", task(Some("Missing")))
        .build()
        .unwrap();

    match compile_with(&broken, None, &options) {
        Ok(_) => println!("  Unexpectedly compiled"),
        Err(CompileError::InvalidReferences(errors)) => {
            println!("  {} problem(s):", errors.len());
            for error in errors {
                println!("    - {error}");
            }
        }
        Err(e) => println!("  Error: {e}"),
    }

    println!("\n=== Example Complete ===");
}
