//! Builder for constructing state machine definitions.

use crate::builder::error::BuildError;
use crate::core::{Definition, State, States};

/// Builder for constructing definitions with a fluent API.
///
/// States keep the order they are added in.
#[derive(Clone, Debug, Default)]
pub struct DefinitionBuilder {
    start_at: Option<String>,
    states: States,
    comment: Option<String>,
}

impl DefinitionBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start state (required).
    pub fn start_at(mut self, name: impl Into<String>) -> Self {
        self.start_at = Some(name.into());
        self
    }

    /// Add a state. A later state of the same name replaces the earlier one.
    pub fn state(mut self, name: impl Into<String>, state: State) -> Self {
        self.states.insert(name, state);
        self
    }

    /// Add multiple states at once.
    pub fn states<N: Into<String>>(mut self, states: impl IntoIterator<Item = (N, State)>) -> Self {
        for (name, state) in states {
            self.states.insert(name, state);
        }
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Build the definition.
    /// Returns an error if required fields are missing.
    ///
    /// Whether `StartAt` and every transition name an existing state is a
    /// separate question, answered by [`crate::validation::check_references`].
    pub fn build(self) -> Result<Definition, BuildError> {
        let start_at = self.start_at.ok_or(BuildError::MissingStartAt)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        Ok(Definition {
            start_at,
            states: self.states,
            comment: self.comment,
            timeout_seconds: None,
            version: None,
        })
    }
}
