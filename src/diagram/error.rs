//! Compilation errors.

use crate::history::HistoryError;
use crate::validation::ReferenceError;
use thiserror::Error;

/// Errors that can occur when compiling a definition into a flowchart.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The definition names states that do not exist
    #[error("Definition has {} unresolved state reference(s): {}", .0.len(), join(.0))]
    InvalidReferences(Vec<ReferenceError>),

    /// Status lookup against the execution history failed
    #[error("Cannot colour states from execution history: {0}")]
    History(#[from] HistoryError),
}

fn join(errors: &[ReferenceError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
