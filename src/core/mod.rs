//! Definition and execution-log data model.
//!
//! This module contains plain data only:
//! - State machine definitions (recursive through Parallel and Map)
//! - Execution event logs and their typed details
//! - Construct categories and per-state status
//! - Service description envelopes
//!
//! Behaviour over these types lives in [`crate::history`] and
//! [`crate::diagram`].

mod definition;
mod describe;
mod error;
mod event;
mod status;

pub use definition::{
    ChoiceRule, ChoiceState, Definition, FailState, MapState, ParallelState, PassState, State,
    States, SucceedState, TaskState, WaitState,
};
pub use describe::{ExecutionDescription, ExecutionStatus, StateMachineDescription};
pub use error::ParseError;
pub use event::{
    Entered, EventId, EventType, ExecutionEvent, ExecutionHistory, ExecutionStartedDetails,
    Exited, FailureDetails, LambdaScheduledDetails, LambdaSucceededDetails, PayloadDetails,
    StateEnteredDetails, StateExitedDetails,
};
pub use status::{Category, Details, Status};
