//! Build errors for definition and chart option builders.

use crate::core::Status;
use thiserror::Error;

/// Errors that can occur when building definitions and chart options.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Start state not specified. Call .start_at(name) before .build()")]
    MissingStartAt,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("Fill `{color}` for {status} states is not a usable style value")]
    InvalidFill { status: Status, color: String },

    #[error("Unknown layout direction `{0}`. Expected one of TB, TD, BT, LR, RL")]
    UnknownDirection(String),
}
