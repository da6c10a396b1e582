//! Flowchart compilation.
//!
//! A definition is compiled into Mermaid flowchart text by structural
//! recursion: each graph (the root, every Parallel branch, every Map
//! iterator) gets its own frame, and state names are prefixed with the
//! frame id so equal names in different graphs never collide. Recursion
//! only follows nesting; `Next` cycles are just edges.
//!
//! When a [`StatusSource`] is supplied every node is filled according to
//! the status of its state.
//!
//! # Example
//!
//! ```rust
//! use stepchart::builder::{succeed, task, DefinitionBuilder, HistoryBuilder};
//! use stepchart::core::Category;
//! use stepchart::diagram::{compile, StatusSource};
//! use stepchart::history::History;
//!
//! let definition = DefinitionBuilder::new()
//!     .start_at("A")
//!     .state("A", task(Some("B")))
//!     .state("B", succeed())
//!     .build()
//!     .unwrap();
//!
//! let log = HistoryBuilder::new()
//!     .execution_started("{}")
//!     .entered(Category::Task, "A", "{}")
//!     .lambda_succeeded("{}")
//!     .build();
//! let history = History::new(&log);
//!
//! let chart = compile(&definition, Some(&history as &dyn StatusSource)).unwrap();
//! assert!(chart.text.starts_with("flowchart TB\n"));
//! assert!(chart.text.contains("style s0-A fill:lightgreen\n"));
//! assert!(chart.text.contains("s0-A --> s0-B\n"));
//! ```

mod context;
mod error;
mod node;
mod options;

pub use context::{Context, Frame};
pub use error::CompileError;
pub use node::Shape;
pub use options::{ChartOptions, Direction, Fills};

use crate::core::{Definition, ExecutionHistory, State, Status};
use crate::history::{History, HistoryError};
use crate::validation::check_references;
use std::fmt;
use stillwater::validation::Validation;
use tracing::{debug, trace};

/// Anything that can report the runtime status of a state by name.
pub trait StatusSource {
    fn status_of(&self, name: &str) -> Result<Status, HistoryError>;
}

impl StatusSource for History<'_> {
    fn status_of(&self, name: &str) -> Result<Status, HistoryError> {
        History::status_of(self, name)
    }
}

/// Compiled flowchart text plus the registry of the nodes it declares.
#[derive(Clone, Debug)]
pub struct Flowchart<'d> {
    pub text: String,
    pub context: Context<'d>,
}

impl Flowchart<'_> {
    /// The state drawn as node `id`.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.context.state(id)
    }
}

impl fmt::Display for Flowchart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Compile `definition` with default options.
pub fn compile<'d>(
    definition: &'d Definition,
    statuses: Option<&dyn StatusSource>,
) -> Result<Flowchart<'d>, CompileError> {
    compile_with(definition, statuses, &ChartOptions::default())
}

/// Compile `definition` into flowchart text.
///
/// # Errors
///
/// - [`CompileError::InvalidReferences`] if any `StartAt`, `Next`, Choice
///   target or `Default` does not name a state of its graph. Nothing is
///   emitted in that case.
/// - [`CompileError::History`] if a status lookup fails.
pub fn compile_with<'d>(
    definition: &'d Definition,
    statuses: Option<&dyn StatusSource>,
    options: &ChartOptions,
) -> Result<Flowchart<'d>, CompileError> {
    if let Validation::Failure(errors) = check_references(definition) {
        let errors: Vec<_> = errors.iter().cloned().collect();
        debug!(count = errors.len(), "definition has unresolved references");
        return Err(CompileError::InvalidReferences(errors));
    }

    let compiler = Compiler { statuses, options };
    let mut context = Context::new();
    let body = compiler.graph(&mut context, definition)?;
    debug!(
        frames = context.frames(),
        nodes = context.states().count(),
        "compiled flowchart"
    );

    Ok(Flowchart {
        text: format!("flowchart {}\n{body}", options.direction),
        context,
    })
}

/// Correlate `log` (if any) and compile `definition` coloured by it.
pub fn render<'d>(
    definition: &'d Definition,
    log: Option<&ExecutionHistory>,
    options: &ChartOptions,
) -> Result<Flowchart<'d>, CompileError> {
    let history = log.map(History::new);
    let statuses = history.as_ref().map(|h| h as &dyn StatusSource);
    compile_with(definition, statuses, options)
}

struct Compiler<'o> {
    statuses: Option<&'o dyn StatusSource>,
    options: &'o ChartOptions,
}

impl Compiler<'_> {
    /// Compile one graph in a fresh frame.
    fn graph<'d>(
        &self,
        context: &mut Context<'d>,
        graph: &'d Definition,
    ) -> Result<String, CompileError> {
        let frame = context.next_frame();
        trace!(frame = frame.id(), states = graph.states.len(), "compiling graph");

        let mut out = String::new();
        out.push_str(&frame.node_id(&graph.start_at));
        out.push('\n');

        for (name, state) in graph.states.iter() {
            let id = frame.node_id(name);
            context.register(id.clone(), state);

            out.push_str(&self.node(context, &frame, &id, name, state)?);
            out.push_str(&node::declaration(&id, name, Shape::of(state)));

            if let Some(statuses) = self.statuses {
                let status = statuses.status_of(name)?;
                out.push_str(&node::fill(&id, self.options.fills.for_status(status)));
            }
            if self.options.tooltips {
                out.push_str(&node::click(&id, name));
            }
            if let Some(next) = state.next() {
                out.push_str(&node::edge(&id, &frame.node_id(next)));
            }
        }

        Ok(out)
    }

    fn node<'d>(
        &self,
        context: &mut Context<'d>,
        frame: &Frame,
        id: &str,
        name: &str,
        state: &'d State,
    ) -> Result<String, CompileError> {
        let direction = self.options.direction;
        let text = match state {
            State::Task(_) | State::Pass(_) | State::Fail(_) | State::Succeed(_) | State::Wait(_) => {
                node::declaration(id, name, Shape::RECTANGLE)
            }
            State::Parallel(parallel) => {
                let mut branches = Vec::with_capacity(parallel.branches.len());
                for branch in &parallel.branches {
                    branches.push(self.graph(context, branch)?);
                }
                format!(
                    "subgraph {id} [{}]\ndirection {direction}\n{}end\n",
                    node::label(name),
                    branches.join("\n")
                )
            }
            State::Map(map) => {
                let body = self.graph(context, &map.iterator)?;
                format!(
                    "subgraph {id} [{}]\nstyle {id} stroke-dasharray: 5 5\ndirection {direction}\n{body}end\n",
                    node::label(name)
                )
            }
            State::Choice(choice) => choice
                .targets()
                .into_iter()
                .map(|target| node::edge(id, &frame.node_id(target)))
                .collect(),
        };
        Ok(text)
    }
}
