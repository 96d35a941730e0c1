//! Transition history tracking.
//!
//! Every committed transition appends exactly one [`HistoryRecord`].
//! Records are never removed or rewritten, so the history is an audit of
//! what did happen even when a later enter/after hook failed.

use super::event::Event;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use hookflow::core::HistoryRecord;
/// use hookflow::{event_enum, state_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum TaskState {
///         Pending,
///         Running,
///     }
/// }
///
/// event_enum! {
///     enum TaskEvent {
///         Start,
///     }
/// }
///
/// let record = HistoryRecord {
///     from: TaskState::Pending,
///     to: TaskState::Running,
///     event: TaskEvent::Start,
///     timestamp: Utc::now(),
///     triggered_by: "worker-1".to_string(),
/// };
/// assert!(!record.is_self_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HistoryRecord<S: State, E: Event> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered the transition
    pub event: E,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
    /// Identity of the actor that triggered the transition
    pub triggered_by: String,
}

impl<S: State, E: Event> HistoryRecord<S, E> {
    /// True when the transition left the entity in the state it started in.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Append-only, ordered history of committed transitions.
///
/// # Example
///
/// ```rust
/// use hookflow::core::{HistoryRecord, TransitionHistory};
/// use hookflow::{event_enum, state_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum WorkState {
///         Start,
///         Middle,
///         End,
///     }
/// }
///
/// event_enum! {
///     enum WorkEvent {
///         Advance,
///     }
/// }
///
/// let mut history = TransitionHistory::new();
/// history.append(HistoryRecord {
///     from: WorkState::Start,
///     to: WorkState::Middle,
///     event: WorkEvent::Advance,
///     timestamp: Utc::now(),
///     triggered_by: "alice".to_string(),
/// });
/// history.append(HistoryRecord {
///     from: WorkState::Middle,
///     to: WorkState::End,
///     event: WorkEvent::Advance,
///     timestamp: Utc::now(),
///     triggered_by: "bob".to_string(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // Start -> Middle -> End
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<S: State, E: Event> {
    records: Vec<HistoryRecord<S, E>>,
}

impl<S: State, E: Event> Default for TransitionHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> TransitionHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record at the end of the history.
    pub fn append(&mut self, record: HistoryRecord<S, E>) {
        self.records.push(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the first
    /// record, then the `to` state of each record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Calculate total duration from first to last record.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All records in commit order.
    pub fn records(&self) -> &[HistoryRecord<S, E>] {
        &self.records
    }

    /// The most recently committed record.
    pub fn last(&self) -> Option<&HistoryRecord<S, E>> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
