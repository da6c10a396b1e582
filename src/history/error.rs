//! Correlation errors.

use crate::core::{EventId, EventType};
use thiserror::Error;

/// Errors that can occur while correlating an event log with state names.
///
/// Both variants point at a defect in the upstream log rather than in the
/// caller's query.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// An input or output payload is not valid JSON
    #[error("Event {event_id} carries a payload that is not valid JSON: {source}")]
    Decode {
        event_id: EventId,
        #[source]
        source: serde_json::Error,
    },

    /// A completion or failure event has no entered event of a compatible
    /// category anywhere up its predecessor chain
    #[error("No entered event precedes {event_type} event {event_id}")]
    UnresolvedAncestor {
        event_id: EventId,
        event_type: EventType,
    },
}
