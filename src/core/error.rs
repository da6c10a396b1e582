//! Decode errors for definitions, event logs and service descriptions.

use thiserror::Error;

/// Errors that can occur when decoding input documents
#[derive(Debug, Error)]
pub enum ParseError {
    /// The state machine definition is not valid JSON of the expected shape
    #[error("Invalid state machine definition: {0}")]
    Definition(#[source] serde_json::Error),

    /// The execution history is not valid JSON of the expected shape
    #[error("Invalid execution history: {0}")]
    History(#[source] serde_json::Error),

    /// A service description could not be decoded
    #[error("Invalid {what} description: {source}")]
    Description {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An execution's input document is not valid JSON
    #[error("Invalid execution input: {0}")]
    ExecutionInput(#[source] serde_json::Error),
}
