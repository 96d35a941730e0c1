//! Contract between the engine and the entity it drives.

use super::event::Event;
use super::history::TransitionHistory;
use super::state::State;
use chrono::{DateTime, Utc};

/// A stateful record whose lifecycle is governed by a state machine.
///
/// The engine borrows the entity mutably for the duration of one
/// transition. It reads and writes the current state, stamps the update
/// time, appends history and lets the entity bump its own counters. Every
/// other field is opaque to the engine and is only touched by hooks.
pub trait Entity: Send {
    type State: State;
    type Event: Event;

    fn state(&self) -> &Self::State;

    fn set_state(&mut self, state: Self::State);

    /// Record the time of the latest committed change.
    fn touch(&mut self, at: DateTime<Utc>);

    fn history(&self) -> &TransitionHistory<Self::State, Self::Event>;

    fn history_mut(&mut self) -> &mut TransitionHistory<Self::State, Self::Event>;

    /// Update domain counters tied to a class of event.
    ///
    /// Called exactly once per committed transition, after the state has
    /// changed and before the history record is appended.
    fn apply_event_counters(&mut self, _event: &Self::Event) {}
}
