//! Correlation of an execution's event log with the states of its definition.
//!
//! [`History`] answers "what happened to state X" by walking the
//! `previousEventId` links of the log. Walks are filtered by construct
//! category so that, for example, a task entered inside a Parallel branch
//! does not satisfy a search for the Parallel's own entered event.
//!
//! # Example
//!
//! ```rust
//! use stepchart::builder::HistoryBuilder;
//! use stepchart::core::{Category, Status};
//! use stepchart::history::History;
//!
//! let log = HistoryBuilder::new()
//!     .execution_started("{}")
//!     .entered(Category::Task, "Charge", r#"{"amount":5}"#)
//!     .lambda_succeeded(r#"{"paid":true}"#)
//!     .exited(Category::Task, "Charge", r#"{"paid":true}"#)
//!     .build();
//!
//! let history = History::new(&log);
//! let details = history.details_of("Charge").unwrap();
//! assert_eq!(details.status, Status::Success);
//! assert_eq!(details.output, Some(serde_json::json!({ "paid": true })));
//! assert_eq!(history.status_of("Refund").unwrap(), Status::NeverRun);
//! ```

mod error;
mod index;

pub use error::HistoryError;

use crate::core::{
    Category, Details, Entered, EventId, ExecutionEvent, ExecutionHistory, Exited, Status,
};
use index::EventIndex;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// Read-only correlator over one execution's event log.
///
/// Construction indexes events by id and by predecessor id; every query
/// afterwards is a pure read.
#[derive(Clone, Debug)]
pub struct History<'a> {
    events: &'a [ExecutionEvent],
    index: EventIndex,
}

impl<'a> History<'a> {
    pub fn new(log: &'a ExecutionHistory) -> Self {
        Self::from_events(&log.events)
    }

    pub fn from_events(events: &'a [ExecutionEvent]) -> Self {
        let index = EventIndex::build(events);
        debug!(events = events.len(), "indexed execution history");
        Self { events, index }
    }

    /// All events in log order.
    pub fn events(&self) -> &'a [ExecutionEvent] {
        self.events
    }

    /// Time from the first to the last event of the log.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.events.first()?, self.events.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// The event with the given id.
    pub fn find_by_id(&self, id: &EventId) -> Option<&'a ExecutionEvent> {
        self.index.position_of(id).map(|position| &self.events[position])
    }

    /// The first event, in log order, whose predecessor is `id`.
    ///
    /// Parallel branches fork from a common predecessor, so several events
    /// may qualify. Only the first is returned; callers that need to tell
    /// branches apart cannot rely on this lookup.
    pub fn find_by_previous_id(&self, id: &EventId) -> Option<&'a ExecutionEvent> {
        self.index
            .position_after(id)
            .map(|position| &self.events[position])
    }

    /// The construct category of an event, from its tag prefix.
    pub fn classify(&self, event: &ExecutionEvent) -> Option<Category> {
        event.event_type.category()
    }

    /// Walk backwards from `event` (inclusive) to the nearest entered event
    /// of category `filter`, or of any category when `filter` is `None`.
    pub fn find_entered_ancestor(
        &self,
        event: &'a ExecutionEvent,
        filter: Option<Category>,
    ) -> Option<Entered<'a>> {
        let mut current = Some(event);
        // A well-formed chain visits each event at most once.
        for _ in 0..=self.events.len() {
            let event = current?;
            if let Some(entered) = event.entered() {
                if matches_filter(entered.category, filter) {
                    return Some(entered);
                }
            }
            current = event
                .previous_event_id
                .as_ref()
                .and_then(|previous| self.find_by_id(previous));
        }
        trace!(event_id = %event.id, "predecessor chain loops back on itself");
        None
    }

    /// Walk forwards from `event` (inclusive) to the nearest exited event of
    /// category `filter`, or of any category when `filter` is `None`.
    pub fn find_exited_descendant(
        &self,
        event: &'a ExecutionEvent,
        filter: Option<Category>,
    ) -> Option<Exited<'a>> {
        let mut current = Some(event);
        for _ in 0..=self.events.len() {
            let event = current?;
            if let Some(exited) = event.exited() {
                if matches_filter(exited.category, filter) {
                    return Some(exited);
                }
            }
            current = self.find_by_previous_id(&event.id);
        }
        trace!(event_id = %event.id, "successor chain loops back on itself");
        None
    }

    /// Status of the state called `name`.
    pub fn status_of(&self, name: &str) -> Result<Status, HistoryError> {
        self.details_of(name).map(|details| details.status)
    }

    /// Status, input and output of the state called `name`.
    ///
    /// The log is scanned once from the front. Entering the state marks it
    /// indeterminate; a construct completion whose entered event names the
    /// state marks it successful. The first task failure anywhere in the log
    /// ends the scan, after marking the state failed if the failure belongs
    /// to it, so later events are never considered.
    ///
    /// # Notes
    ///
    /// The cut-off is the same for every query: a failure in one Parallel
    /// branch leaves sibling and later states `neverrun` even if the log
    /// shows them running.
    ///
    /// # Errors
    ///
    /// - [`HistoryError::UnresolvedAncestor`] if a completion or failure
    ///   event has no compatible entered event up its chain.
    /// - [`HistoryError::Decode`] if a captured payload is not valid JSON.
    pub fn details_of(&self, name: &str) -> Result<Details, HistoryError> {
        let mut details = Details::never_run();

        for event in self.events {
            if let Some(entered) = event.entered() {
                if entered.name() == name {
                    details.status = Status::Indeterminate;
                    details.input = decode(event, entered.input())?;
                    details.entered_at = Some(event.timestamp);
                }
            }

            if event.event_type.is_completion() {
                let (start, end) = self.resolve(event)?;
                if start.name() == name {
                    details.status = Status::Success;
                    capture(&mut details, start, end)?;
                }
            }

            if event.event_type.is_failure() {
                let (start, end) = self.resolve(event)?;
                if start.name() == name {
                    details.status = Status::Fail;
                    capture(&mut details, start, end)?;
                }
                debug!(
                    event_id = %event.id,
                    failed_state = start.name(),
                    queried_state = name,
                    "task failure ends the scan"
                );
                return Ok(details);
            }
        }

        Ok(details)
    }

    /// The entered event that started the construct `event` belongs to, and
    /// the exited event that ended it if the log has one.
    fn resolve(
        &self,
        event: &'a ExecutionEvent,
    ) -> Result<(Entered<'a>, Option<Exited<'a>>), HistoryError> {
        let category = self.classify(event);
        let start = self.find_entered_ancestor(event, category).ok_or_else(|| {
            HistoryError::UnresolvedAncestor {
                event_id: event.id.clone(),
                event_type: event.event_type.clone(),
            }
        })?;
        let end = self.find_exited_descendant(event, category);
        Ok((start, end))
    }
}

fn matches_filter(category: Category, filter: Option<Category>) -> bool {
    filter.map_or(true, |wanted| wanted == category)
}

fn capture(
    details: &mut Details,
    start: Entered<'_>,
    end: Option<Exited<'_>>,
) -> Result<(), HistoryError> {
    details.input = decode(start.event, start.input())?;
    details.entered_at = Some(start.event.timestamp);
    if let Some(end) = end {
        details.output = decode(end.event, end.output())?;
        details.exited_at = Some(end.event.timestamp);
    }
    Ok(())
}

fn decode(event: &ExecutionEvent, payload: Option<&str>) -> Result<Option<Value>, HistoryError> {
    payload
        .map(serde_json::from_str)
        .transpose()
        .map_err(|source| HistoryError::Decode {
            event_id: event.id.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::HistoryBuilder;
    use crate::core::EventType;
    use serde_json::json;

    fn id(n: u64) -> EventId {
        EventId::from(n)
    }

    /// Parallel `Fan` whose branches fork from event 3; the second branch
    /// runs a Map whose iteration contains a task.
    fn parallel_with_map() -> ExecutionHistory {
        HistoryBuilder::new()
            .execution_started("{}") // 1
            .entered(Category::Parallel, "Fan", r#"{"fan":true}"#) // 2
            .push(EventType::Other("ParallelStateStarted".to_string())) // 3
            .entered(Category::Task, "Left", r#"{"side":"left"}"#) // 4
            .lambda_succeeded(r#"{"left":1}"#) // 5
            .exited(Category::Task, "Left", r#"{"left":1}"#) // 6
            .after(3)
            .entered(Category::Map, "Each", "[1,2]") // 7
            .push(EventType::Other("MapIterationStarted".to_string())) // 8
            .entered(Category::Task, "Inner", "1") // 9
            .lambda_succeeded("2") // 10
            .exited(Category::Task, "Inner", "2") // 11
            .exited(Category::Map, "Each", "[2]") // 12
            .parallel_succeeded() // 13
            .exited(Category::Parallel, "Fan", r#"[{"left":1},[2]]"#) // 14
            .build()
    }

    #[test]
    fn find_by_id_and_previous_id() {
        let log = parallel_with_map();
        let history = History::new(&log);

        assert_eq!(history.find_by_id(&id(4)).map(|e| &e.id), Some(&id(4)));
        assert!(history.find_by_id(&id(99)).is_none());

        // Events 4 and 7 both follow 3; the earlier one is returned.
        assert_eq!(
            history.find_by_previous_id(&id(3)).map(|e| &e.id),
            Some(&id(4))
        );
        assert!(history.find_by_previous_id(&id(14)).is_none());
    }

    #[test]
    fn classify_uses_tag_prefix() {
        let log = parallel_with_map();
        let history = History::new(&log);

        let category = |n| history.classify(history.find_by_id(&id(n)).unwrap());
        assert_eq!(category(1), None);
        assert_eq!(category(2), Some(Category::Parallel));
        assert_eq!(category(5), None);
        assert_eq!(category(8), Some(Category::Map));
        assert_eq!(category(13), Some(Category::Parallel));
    }

    #[test]
    fn ancestor_walk_skips_other_categories() {
        let log = parallel_with_map();
        let history = History::new(&log);
        let inner_success = history.find_by_id(&id(10)).unwrap();

        let any = history.find_entered_ancestor(inner_success, None).unwrap();
        assert_eq!(any.name(), "Inner");

        let map = history
            .find_entered_ancestor(inner_success, Some(Category::Map))
            .unwrap();
        assert_eq!(map.name(), "Each");

        let parallel = history
            .find_entered_ancestor(inner_success, Some(Category::Parallel))
            .unwrap();
        assert_eq!(parallel.name(), "Fan");

        assert!(history
            .find_entered_ancestor(inner_success, Some(Category::Choice))
            .is_none());
    }

    #[test]
    fn ancestor_walk_includes_the_start_event() {
        let log = parallel_with_map();
        let history = History::new(&log);
        let fan = history.find_by_id(&id(2)).unwrap();

        let entered = history
            .find_entered_ancestor(fan, Some(Category::Parallel))
            .unwrap();
        assert_eq!(entered.event.id, id(2));
    }

    #[test]
    fn descendant_walk_skips_other_categories() {
        let log = parallel_with_map();
        let history = History::new(&log);
        let map_entered = history.find_by_id(&id(7)).unwrap();

        let any = history.find_exited_descendant(map_entered, None).unwrap();
        assert_eq!(any.name(), "Inner");

        let map = history
            .find_exited_descendant(map_entered, Some(Category::Map))
            .unwrap();
        assert_eq!(map.name(), "Each");

        let parallel = history
            .find_exited_descendant(map_entered, Some(Category::Parallel))
            .unwrap();
        assert_eq!(parallel.name(), "Fan");
        assert_eq!(parallel.event.id, id(14));
    }

    #[test]
    fn descendant_walk_follows_first_branch_only() {
        let log = parallel_with_map();
        let history = History::new(&log);
        let started = history.find_by_id(&id(3)).unwrap();

        // From the fork the walk takes the left branch, which ends without
        // reaching a Map exit.
        assert!(history
            .find_exited_descendant(started, Some(Category::Map))
            .is_none());
    }

    #[test]
    fn never_entered_state_never_ran() {
        let log = parallel_with_map();
        let history = History::new(&log);

        let details = history.details_of("Missing").unwrap();
        assert_eq!(details, Details::never_run());
    }

    #[test]
    fn completions_resolve_to_their_construct() {
        let log = parallel_with_map();
        let history = History::new(&log);

        assert_eq!(history.status_of("Fan").unwrap(), Status::Success);
        assert_eq!(history.status_of("Left").unwrap(), Status::Success);
        assert_eq!(history.status_of("Each").unwrap(), Status::Success);
        assert_eq!(history.status_of("Inner").unwrap(), Status::Success);
    }

    #[test]
    fn success_captures_input_and_output() {
        let log = parallel_with_map();
        let history = History::new(&log);

        let fan = history.details_of("Fan").unwrap();
        assert_eq!(fan.input, Some(json!({ "fan": true })));
        assert_eq!(fan.output, Some(json!([{ "left": 1 }, [2]])));
        assert_eq!(fan.entered_at, Some(log.events[1].timestamp));
        assert_eq!(fan.exited_at, Some(log.events[13].timestamp));
        assert_eq!(fan.duration(), Some(Duration::from_secs(12)));

        let each = history.details_of("Each").unwrap();
        assert_eq!(each.input, Some(json!([1, 2])));
        assert_eq!(each.output, Some(json!([2])));
    }

    #[test]
    fn entered_without_completion_is_indeterminate() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Task, "Slow", r#"{"q":1}"#)
            .lambda_scheduled("arn:slow")
            .build();
        let history = History::new(&log);

        let details = history.details_of("Slow").unwrap();
        assert_eq!(details.status, Status::Indeterminate);
        assert_eq!(details.input, Some(json!({ "q": 1 })));
        assert_eq!(details.output, None);
    }

    #[test]
    fn failure_marks_state_failed() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Task, "Charge", r#"{"card":"x"}"#)
            .lambda_scheduled("arn:charge")
            .lambda_failed("CardDeclined", "insufficient funds")
            .build();
        let history = History::new(&log);

        let details = history.details_of("Charge").unwrap();
        assert_eq!(details.status, Status::Fail);
        assert_eq!(details.input, Some(json!({ "card": "x" })));
        assert_eq!(details.output, None);
    }

    #[test]
    fn failure_halts_the_whole_scan() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Task, "A", "{}")
            .lambda_failed("Boom", "A broke")
            .entered(Category::Task, "B", "{}")
            .lambda_succeeded("{}")
            .exited(Category::Task, "B", "{}")
            .build();
        let history = History::new(&log);

        assert_eq!(history.status_of("A").unwrap(), Status::Fail);
        assert_eq!(history.status_of("B").unwrap(), Status::NeverRun);
        // Repeated queries see the same log-global cut-off.
        assert_eq!(history.status_of("B").unwrap(), Status::NeverRun);
    }

    #[test]
    fn failure_in_one_branch_masks_a_later_sibling() {
        let log = HistoryBuilder::new()
            .execution_started("{}") // 1
            .entered(Category::Parallel, "Fan", "{}") // 2
            .entered(Category::Task, "Left", "{}") // 3
            .lambda_failed("Boom", "left broke") // 4
            .after(2)
            .entered(Category::Task, "Right", "{}") // 5
            .lambda_succeeded("{}") // 6
            .build();
        let history = History::new(&log);

        assert_eq!(history.status_of("Left").unwrap(), Status::Fail);
        assert_eq!(history.status_of("Right").unwrap(), Status::NeverRun);
        assert_eq!(history.status_of("Fan").unwrap(), Status::Indeterminate);
    }

    #[test]
    fn re_entry_returns_to_indeterminate() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Pass, "Loop", "1")
            .exited(Category::Pass, "Loop", "2")
            .entered(Category::Pass, "Loop", "2")
            .build();
        let history = History::new(&log);

        let details = history.details_of("Loop").unwrap();
        assert_eq!(details.status, Status::Indeterminate);
        assert_eq!(details.input, Some(json!(2)));
        assert_eq!(details.output, Some(json!(2)));
    }

    #[test]
    fn choice_exit_counts_as_success() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Choice, "Route", r#"{"go":"left"}"#)
            .exited(Category::Choice, "Route", r#"{"go":"left"}"#)
            .build();
        let history = History::new(&log);

        let details = history.details_of("Route").unwrap();
        assert_eq!(details.status, Status::Success);
        assert_eq!(details.output, Some(json!({ "go": "left" })));
    }

    #[test]
    fn invalid_payload_is_reported() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Task, "A", "{oops")
            .build();
        let history = History::new(&log);

        match history.details_of("A") {
            Err(HistoryError::Decode { event_id, .. }) => assert_eq!(event_id, id(2)),
            other => panic!("Expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn orphaned_completion_is_reported() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .lambda_succeeded("{}")
            .build();
        let history = History::new(&log);

        match history.details_of("Anything") {
            Err(HistoryError::UnresolvedAncestor { event_id, event_type }) => {
                assert_eq!(event_id, id(2));
                assert_eq!(event_type, EventType::LambdaFunctionSucceeded);
            }
            other => panic!("Expected unresolved ancestor, got {other:?}"),
        }
    }

    #[test]
    fn predecessor_cycle_ends_the_walk() {
        let log = HistoryBuilder::new()
            .after(2)
            .push(EventType::Other("Marker".to_string())) // 1, previous 2
            .after(1)
            .push(EventType::Other("Marker".to_string())) // 2, previous 1
            .build();
        let history = History::new(&log);

        let start = history.find_by_id(&id(2)).unwrap();
        assert!(history.find_entered_ancestor(start, None).is_none());
        assert!(history.find_exited_descendant(start, None).is_none());
    }

    #[test]
    fn history_duration_spans_the_log() {
        let log = parallel_with_map();
        let history = History::new(&log);
        assert_eq!(history.duration(), Some(Duration::from_secs(13)));

        let empty = ExecutionHistory::default();
        assert!(History::new(&empty).duration().is_none());
    }
}
