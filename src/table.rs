//! Transition table: `(state, event) -> next state`.

use crate::core::{Event, State};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while filling a transition table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    #[error("transition for event '{event}' from state '{from}' is already registered (to '{existing}')")]
    Duplicate {
        from: String,
        event: String,
        existing: String,
    },
}

/// Closed mapping of legal events per state.
///
/// Each `(state, event)` pair maps to at most one destination. A second
/// registration for the same pair is rejected rather than overwriting the
/// first. The table imposes no shape on the graph: self-loops, cycles and
/// unreachable states are all allowed, and a state with no outgoing entry
/// is terminal.
#[derive(Clone, Debug)]
pub struct TransitionTable<S: State, E: Event> {
    entries: HashMap<(S, E), S>,
}

impl<S: State, E: Event> TransitionTable<S, E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `from --event--> to`.
    pub fn insert(&mut self, from: S, event: E, to: S) -> Result<(), TableError> {
        if let Some(existing) = self.entries.get(&(from.clone(), event.clone())) {
            return Err(TableError::Duplicate {
                from: from.name().to_string(),
                event: event.name().to_string(),
                existing: existing.name().to_string(),
            });
        }
        self.entries.insert((from, event), to);
        Ok(())
    }

    /// Destination for `event` fired in `state`, if the event is legal there.
    pub fn lookup(&self, state: &S, event: &E) -> Option<&S> {
        self.entries.get(&(state.clone(), event.clone()))
    }

    /// Events accepted in `state`, with their destinations.
    pub fn events_from<'a>(&'a self, state: &S) -> impl Iterator<Item = (&'a E, &'a S)> + 'a {
        let state = state.clone();
        self.entries
            .iter()
            .filter(move |((from, _), _)| *from == state)
            .map(|((_, event), to)| (event, to))
    }

    pub fn is_terminal(&self, state: &S) -> bool {
        self.events_from(state).next().is_none()
    }

    /// Every state that appears as a source or a destination.
    pub fn states(&self) -> HashSet<&S> {
        self.entries
            .iter()
            .flat_map(|((from, _), to)| [from, to])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State, E: Event> Default for TransitionTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
