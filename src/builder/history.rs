//! Builder for assembling execution event logs.
//!
//! Events are numbered from 1 in push order and, unless redirected with
//! [`HistoryBuilder::after`], each one points at the event pushed just
//! before it. Timestamps advance by a fixed tick so logs are reproducible.

use crate::core::{
    Category, EventId, EventType, ExecutionEvent, ExecutionHistory, ExecutionStartedDetails,
    FailureDetails, LambdaScheduledDetails, LambdaSucceededDetails, StateEnteredDetails,
    StateExitedDetails,
};
use chrono::{DateTime, Duration, Utc};

/// Builder for constructing event logs with a fluent API.
///
/// # Example
///
/// ```rust
/// use stepchart::builder::HistoryBuilder;
/// use stepchart::core::{Category, EventId};
///
/// let log = HistoryBuilder::new()
///     .execution_started("{}")                     // 1
///     .entered(Category::Parallel, "Fan", "{}")    // 2
///     .entered(Category::Pass, "Left", "{}")       // 3, after 2
///     .after(2)
///     .entered(Category::Pass, "Right", "{}")      // 4, also after 2
///     .build();
///
/// assert_eq!(log.events[3].previous_event_id, Some(EventId::from(2)));
/// ```
#[derive(Clone, Debug)]
pub struct HistoryBuilder {
    events: Vec<ExecutionEvent>,
    clock: DateTime<Utc>,
    tick: Duration,
    last: Option<EventId>,
    fork: Option<EventId>,
}

impl HistoryBuilder {
    /// Create a builder whose first event is stamped at the Unix epoch.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            clock: DateTime::<Utc>::default(),
            tick: Duration::seconds(1),
            last: None,
            fork: None,
        }
    }

    /// Stamp the next event at `timestamp`.
    pub fn starting_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.clock = timestamp;
        self
    }

    /// Time between consecutive events.
    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Make the next event's predecessor `id` instead of the last event.
    pub fn after(mut self, id: impl Into<EventId>) -> Self {
        self.fork = Some(id.into());
        self
    }

    /// Id of the most recently pushed event.
    pub fn last_id(&self) -> Option<&EventId> {
        self.last.as_ref()
    }

    /// Push a bare event of the given type.
    pub fn push(self, event_type: EventType) -> Self {
        self.push_with(event_type, |_| {})
    }

    pub fn execution_started(self, input: &str) -> Self {
        let input = input.to_string();
        self.push_with(EventType::ExecutionStarted, move |event| {
            event.execution_started_event_details = Some(ExecutionStartedDetails {
                input: Some(input),
                ..ExecutionStartedDetails::default()
            });
        })
    }

    pub fn execution_succeeded(self) -> Self {
        self.push(EventType::ExecutionSucceeded)
    }

    pub fn execution_failed(self, error: &str, cause: &str) -> Self {
        let details = failure(error, cause);
        self.push_with(EventType::ExecutionFailed, move |event| {
            event.execution_failed_event_details = Some(details);
        })
    }

    /// Push a `<Category>StateEntered` event.
    pub fn entered(self, category: Category, name: &str, input: &str) -> Self {
        let details = StateEnteredDetails {
            name: name.to_string(),
            input: Some(input.to_string()),
            input_details: None,
        };
        self.push_with(EventType::StateEntered(category), move |event| {
            event.state_entered_event_details = Some(details);
        })
    }

    /// Push a `<Category>StateExited` event.
    pub fn exited(self, category: Category, name: &str, output: &str) -> Self {
        let details = StateExitedDetails {
            name: name.to_string(),
            output: Some(output.to_string()),
            output_details: None,
        };
        self.push_with(EventType::StateExited(category), move |event| {
            event.state_exited_event_details = Some(details);
        })
    }

    pub fn lambda_scheduled(self, resource: &str) -> Self {
        let resource = resource.to_string();
        self.push_with(EventType::LambdaFunctionScheduled, move |event| {
            event.lambda_function_scheduled_event_details = Some(LambdaScheduledDetails {
                resource: Some(resource),
                ..LambdaScheduledDetails::default()
            });
        })
    }

    pub fn lambda_started(self) -> Self {
        self.push(EventType::LambdaFunctionStarted)
    }

    pub fn lambda_succeeded(self, output: &str) -> Self {
        let output = output.to_string();
        self.push_with(EventType::LambdaFunctionSucceeded, move |event| {
            event.lambda_function_succeeded_event_details = Some(LambdaSucceededDetails {
                output: Some(output),
                output_details: None,
            });
        })
    }

    pub fn lambda_failed(self, error: &str, cause: &str) -> Self {
        let details = failure(error, cause);
        self.push_with(EventType::LambdaFunctionFailed, move |event| {
            event.lambda_function_failed_event_details = Some(details);
        })
    }

    pub fn parallel_succeeded(self) -> Self {
        self.push(EventType::ParallelStateSucceeded)
    }

    /// Build the log.
    pub fn build(self) -> ExecutionHistory {
        ExecutionHistory::new(self.events)
    }

    fn push_with(mut self, event_type: EventType, fill: impl FnOnce(&mut ExecutionEvent)) -> Self {
        let id = EventId::from(self.events.len() as u64 + 1);
        let previous = self.fork.take().or_else(|| self.last.clone());
        let mut event = ExecutionEvent::new(id.clone(), previous, self.clock, event_type);
        fill(&mut event);

        self.events.push(event);
        self.clock += self.tick;
        self.last = Some(id);
        self
    }
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(error: &str, cause: &str) -> FailureDetails {
    FailureDetails {
        error: Some(error.to_string()),
        cause: Some(cause.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn events_chain_in_push_order() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Task, "A", "{}")
            .lambda_succeeded("{}")
            .build();

        let ids: Vec<&str> = log.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(log.events[0].previous_event_id, None);
        assert_eq!(log.events[2].previous_event_id, Some(EventId::from(2)));
    }

    #[test]
    fn after_redirects_one_event() {
        let log = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Parallel, "P", "{}")
            .entered(Category::Pass, "L", "{}")
            .after(2)
            .entered(Category::Pass, "R", "{}")
            .exited(Category::Pass, "R", "{}")
            .build();

        assert_eq!(log.events[3].previous_event_id, Some(EventId::from(2)));
        assert_eq!(log.events[4].previous_event_id, Some(EventId::from(4)));
    }

    #[test]
    fn clock_advances_by_tick() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let log = HistoryBuilder::new()
            .starting_at(start)
            .tick(Duration::milliseconds(500))
            .execution_started("{}")
            .execution_succeeded()
            .build();

        assert_eq!(log.events[0].timestamp, start);
        assert_eq!(log.events[1].timestamp, start + Duration::milliseconds(500));
    }

    #[test]
    fn details_match_event_type() {
        let log = HistoryBuilder::new()
            .entered(Category::Wait, "Pause", r#"{"s":1}"#)
            .exited(Category::Wait, "Pause", r#"{"s":2}"#)
            .lambda_failed("Err", "cause")
            .build();

        assert_eq!(log.events[0].entered().map(|e| e.name()), Some("Pause"));
        assert_eq!(log.events[1].exited().map(|e| e.output()), Some(Some(r#"{"s":2}"#)));
        assert_eq!(
            log.events[2]
                .lambda_function_failed_event_details
                .as_ref()
                .and_then(|d| d.error.as_deref()),
            Some("Err")
        );
    }

    #[test]
    fn last_id_tracks_pushes() {
        let builder = HistoryBuilder::new();
        assert!(builder.last_id().is_none());

        let builder = builder.execution_started("{}").lambda_started();
        assert_eq!(builder.last_id(), Some(&EventId::from(2)));
    }
}
