//! Per-state hook lists.

use super::error::HookPhase;
use super::hook::{Hook, SharedHook};
use crate::core::Entity;
use std::fmt;
use std::sync::Arc;

/// Ordered hooks to append to one state's node.
///
/// Hooks keep the order they were added in within each phase.
///
/// # Example
///
/// ```rust
/// use hookflow::hooks::{FnHook, HookPhase, HookSet};
/// # use hookflow::core::{Entity, TransitionHistory};
/// # use hookflow::{event_enum, state_enum};
/// # state_enum! { enum S { A } }
/// # event_enum! { enum Ev { Go } }
/// # struct Thing { state: S, history: TransitionHistory<S, Ev> }
/// # impl Entity for Thing {
/// #     type State = S;
/// #     type Event = Ev;
/// #     fn state(&self) -> &S { &self.state }
/// #     fn set_state(&mut self, state: S) { self.state = state; }
/// #     fn touch(&mut self, _at: chrono::DateTime<chrono::Utc>) {}
/// #     fn history(&self) -> &TransitionHistory<S, Ev> { &self.history }
/// #     fn history_mut(&mut self) -> &mut TransitionHistory<S, Ev> { &mut self.history }
/// # }
///
/// let set = HookSet::<Thing>::new()
///     .guard(FnHook::<Thing>::new("allowed", |_, _, _| Ok(())))
///     .after(FnHook::<Thing>::new("notify", |_, _, _| Ok(())));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.count(HookPhase::Guard), 1);
/// ```
pub struct HookSet<E: Entity> {
    hooks: Vec<(HookPhase, SharedHook<E>)>,
}

impl<E: Entity> HookSet<E> {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Build a set from the five lists in one call.
    pub fn from_lists(
        guards: Vec<SharedHook<E>>,
        before: Vec<SharedHook<E>>,
        after: Vec<SharedHook<E>>,
        on_enter: Vec<SharedHook<E>>,
        on_exit: Vec<SharedHook<E>>,
    ) -> Self {
        let mut set = Self::new();
        for (phase, list) in [
            (HookPhase::Guard, guards),
            (HookPhase::Before, before),
            (HookPhase::After, after),
            (HookPhase::Enter, on_enter),
            (HookPhase::Exit, on_exit),
        ] {
            set.hooks.extend(list.into_iter().map(|hook| (phase, hook)));
        }
        set
    }

    /// Add an already shared hook to a phase.
    pub fn with(mut self, phase: HookPhase, hook: SharedHook<E>) -> Self {
        self.hooks.push((phase, hook));
        self
    }

    pub fn guard(self, hook: impl Hook<E> + 'static) -> Self {
        self.with(HookPhase::Guard, Arc::new(hook))
    }

    pub fn before(self, hook: impl Hook<E> + 'static) -> Self {
        self.with(HookPhase::Before, Arc::new(hook))
    }

    pub fn on_exit(self, hook: impl Hook<E> + 'static) -> Self {
        self.with(HookPhase::Exit, Arc::new(hook))
    }

    pub fn on_enter(self, hook: impl Hook<E> + 'static) -> Self {
        self.with(HookPhase::Enter, Arc::new(hook))
    }

    pub fn after(self, hook: impl Hook<E> + 'static) -> Self {
        self.with(HookPhase::After, Arc::new(hook))
    }

    pub fn count(&self, phase: HookPhase) -> usize {
        self.hooks.iter().filter(|(p, _)| *p == phase).count()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<E: Entity> Default for HookSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// The hook lists attached to one state.
///
/// Guards, before and exit hooks run when the state is the source of a
/// transition; enter and after hooks run when it is the destination.
pub struct Node<E: Entity> {
    guards: Vec<SharedHook<E>>,
    before: Vec<SharedHook<E>>,
    exit: Vec<SharedHook<E>>,
    enter: Vec<SharedHook<E>>,
    after: Vec<SharedHook<E>>,
}

impl<E: Entity> Node<E> {
    pub fn new() -> Self {
        Self {
            guards: Vec::new(),
            before: Vec::new(),
            exit: Vec::new(),
            enter: Vec::new(),
            after: Vec::new(),
        }
    }

    pub fn hooks(&self, phase: HookPhase) -> &[SharedHook<E>] {
        match phase {
            HookPhase::Guard => &self.guards,
            HookPhase::Before => &self.before,
            HookPhase::Exit => &self.exit,
            HookPhase::Enter => &self.enter,
            HookPhase::After => &self.after,
        }
    }

    fn list_mut(&mut self, phase: HookPhase) -> &mut Vec<SharedHook<E>> {
        match phase {
            HookPhase::Guard => &mut self.guards,
            HookPhase::Before => &mut self.before,
            HookPhase::Exit => &mut self.exit,
            HookPhase::Enter => &mut self.enter,
            HookPhase::After => &mut self.after,
        }
    }

    /// Append every hook of the set after the ones already present.
    pub fn extend(&mut self, set: HookSet<E>) {
        for (phase, hook) in set.hooks {
            self.list_mut(phase).push(hook);
        }
    }

    pub fn is_empty(&self) -> bool {
        HookPhase::ALL.iter().all(|phase| self.hooks(*phase).is_empty())
    }
}

impl<E: Entity> Default for Node<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> fmt::Debug for Node<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |list: &[SharedHook<E>]| -> Vec<String> {
            list.iter().map(|hook| hook.name().to_string()).collect()
        };
        f.debug_struct("Node")
            .field("guards", &names(&self.guards))
            .field("before", &names(&self.before))
            .field("exit", &names(&self.exit))
            .field("enter", &names(&self.enter))
            .field("after", &names(&self.after))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::FnHook;
    use crate::testing::Counter;

    fn named(name: &str) -> FnHook<Counter> {
        FnHook::<Counter>::new(name, |_, _, _| Ok(()))
    }

    fn shared(name: &str) -> SharedHook<Counter> {
        Arc::new(named(name))
    }

    fn names(node: &Node<Counter>, phase: HookPhase) -> Vec<String> {
        node.hooks(phase).iter().map(|h| h.name().to_string()).collect()
    }

    #[test]
    fn new_node_is_empty() {
        let node: Node<Counter> = Node::new();
        assert!(node.is_empty());
    }

    #[test]
    fn extend_routes_hooks_to_their_phase() {
        let mut node = Node::new();
        node.extend(
            HookSet::new()
                .guard(named("g"))
                .before(named("b"))
                .on_exit(named("x"))
                .on_enter(named("n"))
                .after(named("a")),
        );

        assert_eq!(names(&node, HookPhase::Guard), vec!["g"]);
        assert_eq!(names(&node, HookPhase::Before), vec!["b"]);
        assert_eq!(names(&node, HookPhase::Exit), vec!["x"]);
        assert_eq!(names(&node, HookPhase::Enter), vec!["n"]);
        assert_eq!(names(&node, HookPhase::After), vec!["a"]);
    }

    #[test]
    fn extend_is_additive_and_order_preserving() {
        let mut node = Node::new();
        node.extend(HookSet::new().after(named("first")).after(named("second")));
        node.extend(HookSet::new().after(named("third")));

        assert_eq!(names(&node, HookPhase::After), vec!["first", "second", "third"]);
    }

    #[test]
    fn from_lists_maps_each_list() {
        let set: HookSet<Counter> = HookSet::from_lists(
            vec![shared("g")],
            vec![],
            vec![shared("a1"), shared("a2")],
            vec![shared("n")],
            vec![],
        );

        assert_eq!(set.count(HookPhase::Guard), 1);
        assert_eq!(set.count(HookPhase::After), 2);
        assert_eq!(set.count(HookPhase::Enter), 1);
        assert_eq!(set.count(HookPhase::Exit), 0);
    }

    #[test]
    fn debug_lists_hook_names() {
        let mut node = Node::new();
        node.extend(HookSet::new().guard(named("only-admins")));

        assert!(format!("{node:?}").contains("only-admins"));
    }
}
