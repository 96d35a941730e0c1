//! Hook registry keyed by state.

use super::node::{HookSet, Node};
use crate::core::Entity;
use std::collections::HashMap;
use std::fmt;

/// Nodes for every state a machine knows about.
///
/// Registration is additive: registering twice on the same state appends
/// the second set after the first. The registry is filled during setup and
/// only read once the machine is built.
pub struct HookRegistry<E: Entity> {
    nodes: HashMap<E::State, Node<E>>,
}

impl<E: Entity> HookRegistry<E> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Make sure `state` has a node, even an empty one.
    pub fn ensure_node(&mut self, state: E::State) -> &mut Node<E> {
        self.nodes.entry(state).or_default()
    }

    /// Append `set` to the node of `state`, creating the node if absent.
    pub fn register(&mut self, state: E::State, set: HookSet<E>) {
        self.ensure_node(state).extend(set);
    }

    pub fn node(&self, state: &E::State) -> Option<&Node<E>> {
        self.nodes.get(state)
    }

    pub fn contains(&self, state: &E::State) -> bool {
        self.nodes.contains_key(state)
    }

    pub fn states(&self) -> impl Iterator<Item = &E::State> {
        self.nodes.keys()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<E: Entity> Default for HookRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> fmt::Debug for HookRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.nodes.iter()).finish()
    }
}
