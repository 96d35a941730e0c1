//! Small entity shared by the unit tests.

use crate::core::{Entity, TransitionHistory};
use crate::{event_enum, state_enum};
use chrono::{DateTime, Utc};

state_enum! {
    pub enum CounterState {
        Idle,
        Counting,
        Done,
    }
    final: [Done]
}

event_enum! {
    pub enum CounterEvent {
        Start,
        Increment,
        Finish,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Counter {
    pub state: CounterState,
    pub value: i64,
    pub increments: u32,
    pub updated_at: Option<DateTime<Utc>>,
    pub history: TransitionHistory<CounterState, CounterEvent>,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            state: CounterState::Idle,
            value: 0,
            increments: 0,
            updated_at: None,
            history: TransitionHistory::new(),
        }
    }
}

impl Entity for Counter {
    type State = CounterState;
    type Event = CounterEvent;

    fn state(&self) -> &CounterState {
        &self.state
    }

    fn set_state(&mut self, state: CounterState) {
        self.state = state;
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn history(&self) -> &TransitionHistory<CounterState, CounterEvent> {
        &self.history
    }

    fn history_mut(&mut self) -> &mut TransitionHistory<CounterState, CounterEvent> {
        &mut self.history
    }

    fn apply_event_counters(&mut self, event: &CounterEvent) {
        if *event == CounterEvent::Increment {
            self.increments += 1;
        }
    }
}
