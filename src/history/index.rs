//! Lookup tables over an event log.

use crate::core::{EventId, ExecutionEvent};
use std::collections::HashMap;

/// Positions of events keyed by their id and by their predecessor's id.
///
/// When several events share a key the first one in log order wins, which
/// is what a front-to-back scan of the log would return.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventIndex {
    by_id: HashMap<EventId, usize>,
    by_previous: HashMap<EventId, usize>,
}

impl EventIndex {
    pub(crate) fn build(events: &[ExecutionEvent]) -> Self {
        let mut index = Self {
            by_id: HashMap::with_capacity(events.len()),
            by_previous: HashMap::with_capacity(events.len()),
        };
        for (position, event) in events.iter().enumerate() {
            index.by_id.entry(event.id.clone()).or_insert(position);
            if let Some(previous) = &event.previous_event_id {
                index.by_previous.entry(previous.clone()).or_insert(position);
            }
        }
        index
    }

    pub(crate) fn position_of(&self, id: &EventId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn position_after(&self, id: &EventId) -> Option<usize> {
        self.by_previous.get(id).copied()
    }
}
