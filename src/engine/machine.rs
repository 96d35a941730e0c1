//! State machine that drives an entity through its hook pipeline.

use crate::builder::MachineBuilder;
use crate::core::{Entity, Event, HistoryRecord};
use crate::engine::error::TransitionError;
use crate::hooks::{HookContext, HookError, HookPhase, HookRegistry, Node};
use crate::table::TransitionTable;
use chrono::Utc;
use std::fmt;

/// Phases run on the source node, in order, before the entity changes.
const PRE_COMMIT: [HookPhase; 3] = [HookPhase::Guard, HookPhase::Before, HookPhase::Exit];

/// Phases run on the destination node, in order, after the entity changed.
const POST_COMMIT: [HookPhase; 2] = [HookPhase::Enter, HookPhase::After];

/// Transition table plus hook registry, fixed once built.
///
/// A machine holds no per-entity data, so one instance (behind an `Arc`)
/// can serve transitions on any number of entities concurrently. Callers
/// must not run two transitions on the same entity at once; `transition`
/// takes the entity by `&mut` for that reason.
pub struct StateMachine<E: Entity> {
    table: TransitionTable<E::State, E::Event>,
    registry: HookRegistry<E>,
}

impl<E: Entity> StateMachine<E> {
    /// Start configuring a machine.
    pub fn builder() -> MachineBuilder<E> {
        MachineBuilder::new()
    }

    pub(crate) fn from_parts(
        table: TransitionTable<E::State, E::Event>,
        registry: HookRegistry<E>,
    ) -> Self {
        Self { table, registry }
    }

    /// Fire `event` on `entity`.
    ///
    /// Steps, in order:
    ///
    /// 1. resolve the destination in the table, or fail with
    ///    `InvalidTransition` without running any hook
    /// 2. run the source node's guards, then before actions, then exit
    ///    actions; the first failure aborts with the entity untouched
    /// 3. commit: set the state, apply event counters, stamp the update
    ///    time and append one history record
    /// 4. run the destination node's enter actions, then after actions;
    ///    the first failure is returned as `PostCommitActionFailed` and the
    ///    commit stays in place
    ///
    /// Within a phase hooks run in registration order and stop at the
    /// first failure. Returns the destination state on success.
    pub fn transition(
        &self,
        entity: &mut E,
        event: &E::Event,
        ctx: &HookContext,
    ) -> Result<E::State, TransitionError<E::State>> {
        let from = entity.state().clone();
        let Some(to) = self.table.lookup(&from, event).cloned() else {
            return Err(TransitionError::InvalidTransition {
                from,
                event: event.name().to_string(),
            });
        };

        let source = self.registry.node(&from);
        for phase in PRE_COMMIT {
            if let Err((hook, error)) = run_phase(source, phase, entity, event, ctx) {
                return Err(match phase {
                    HookPhase::Guard => TransitionError::GuardRejected {
                        state: from,
                        hook,
                        source: error,
                    },
                    _ => TransitionError::PreCommitActionFailed {
                        state: from,
                        phase,
                        hook,
                        source: error,
                    },
                });
            }
        }

        commit(entity, from, to.clone(), event, ctx);

        let destination = self.registry.node(&to);
        for phase in POST_COMMIT {
            if let Err((hook, error)) = run_phase(destination, phase, entity, event, ctx) {
                return Err(TransitionError::PostCommitActionFailed {
                    state: to,
                    phase,
                    hook,
                    source: error,
                });
            }
        }

        Ok(to)
    }

    /// True when `event` is legal in `state`.
    pub fn can_fire(&self, state: &E::State, event: &E::Event) -> bool {
        self.table.lookup(state, event).is_some()
    }

    /// Destination of `event` in `state`, without running anything.
    pub fn next_state(&self, state: &E::State, event: &E::Event) -> Option<&E::State> {
        self.table.lookup(state, event)
    }

    /// Events legal in `state`.
    pub fn available_events(&self, state: &E::State) -> Vec<&E::Event> {
        self.table.events_from(state).map(|(event, _)| event).collect()
    }

    pub fn is_terminal(&self, state: &E::State) -> bool {
        self.table.is_terminal(state)
    }

    pub fn table(&self) -> &TransitionTable<E::State, E::Event> {
        &self.table
    }

    pub fn registry(&self) -> &HookRegistry<E> {
        &self.registry
    }
}

impl<E: Entity> fmt::Debug for StateMachine<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("table", &self.table)
            .field("registry", &self.registry)
            .finish()
    }
}

/// Run one phase of a node, stopping at the first failing hook.
fn run_phase<E: Entity>(
    node: Option<&Node<E>>,
    phase: HookPhase,
    entity: &mut E,
    event: &E::Event,
    ctx: &HookContext,
) -> Result<(), (String, HookError)> {
    let Some(node) = node else {
        return Ok(());
    };
    for hook in node.hooks(phase) {
        hook.execute(entity, event, ctx)
            .map_err(|error| (hook.name().to_string(), error))?;
    }
    Ok(())
}

fn commit<E: Entity>(
    entity: &mut E,
    from: E::State,
    to: E::State,
    event: &E::Event,
    ctx: &HookContext,
) {
    let now = Utc::now();
    entity.set_state(to.clone());
    entity.apply_event_counters(event);
    entity.touch(now);
    entity.history_mut().append(HistoryRecord {
        from,
        to,
        event: event.clone(),
        timestamp: now,
        triggered_by: ctx.actor().to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{FnHook, HookSet};
    use crate::testing::{Counter, CounterEvent, CounterState};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn counter_machine(hooks: Vec<(CounterState, HookSet<Counter>)>) -> StateMachine<Counter> {
        let mut builder = StateMachine::builder()
            .states(CounterState::ALL.iter().copied())
            .transition(CounterState::Idle, CounterEvent::Start, CounterState::Counting)
            .transition(CounterState::Counting, CounterEvent::Increment, CounterState::Counting)
            .transition(CounterState::Counting, CounterEvent::Finish, CounterState::Done);
        for (state, set) in hooks {
            builder = builder.hooks(state, set);
        }
        builder.build().unwrap()
    }

    /// Hook that appends its label to a shared trace and succeeds.
    fn traced(label: &'static str, trace: &Arc<Mutex<Vec<&'static str>>>) -> FnHook<Counter> {
        let trace = Arc::clone(trace);
        FnHook::<Counter>::new(label, move |_, _, _| {
            trace.lock().unwrap().push(label);
            Ok(())
        })
    }

    fn failing(label: &'static str, error: HookError) -> FnHook<Counter> {
        FnHook::<Counter>::new(label, move |_, _, _| Err(error.clone()))
    }

    #[test]
    fn simple_transition_succeeds() {
        let machine = counter_machine(vec![]);
        let mut counter = Counter::default();

        let result = machine.transition(&mut counter, &CounterEvent::Start, &HookContext::new("alice"));

        assert_eq!(result, Ok(CounterState::Counting));
        assert_eq!(counter.state, CounterState::Counting);
        assert_eq!(counter.history.len(), 1);
        assert!(counter.updated_at.is_some());

        let record = counter.history.last().unwrap();
        assert_eq!(record.from, CounterState::Idle);
        assert_eq!(record.to, CounterState::Counting);
        assert_eq!(record.event, CounterEvent::Start);
        assert_eq!(record.triggered_by, "alice");
        assert_eq!(Some(record.timestamp), counter.updated_at);
    }

    #[test]
    fn invalid_transition_leaves_entity_untouched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let machine = counter_machine(vec![(
            CounterState::Idle,
            HookSet::new().guard(FnHook::<Counter>::new("count", move |_, _, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })),
        )]);
        let mut counter = Counter::default();
        let before = counter.clone();

        let result = machine.transition(&mut counter, &CounterEvent::Finish, &HookContext::new("alice"));

        assert_eq!(
            result,
            Err(TransitionError::InvalidTransition {
                from: CounterState::Idle,
                event: "Finish".to_string(),
            })
        );
        assert_eq!(counter, before);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn hooks_run_in_pipeline_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let machine = counter_machine(vec![
            (
                CounterState::Idle,
                HookSet::new()
                    .after(traced("idle-after", &trace))
                    .on_exit(traced("idle-exit", &trace))
                    .before(traced("idle-before", &trace))
                    .guard(traced("idle-guard", &trace))
                    .on_enter(traced("idle-enter", &trace)),
            ),
            (
                CounterState::Counting,
                HookSet::new()
                    .after(traced("counting-after", &trace))
                    .on_enter(traced("counting-enter", &trace))
                    .guard(traced("counting-guard", &trace)),
            ),
        ]);
        let mut counter = Counter::default();

        machine
            .transition(&mut counter, &CounterEvent::Start, &HookContext::new("alice"))
            .unwrap();

        assert_eq!(
            *trace.lock().unwrap(),
            vec![
                "idle-guard",
                "idle-before",
                "idle-exit",
                "counting-enter",
                "counting-after"
            ]
        );
    }

    #[test]
    fn hooks_within_a_phase_keep_registration_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let machine = counter_machine(vec![(
            CounterState::Idle,
            HookSet::new()
                .guard(traced("first", &trace))
                .guard(traced("second", &trace))
                .guard(traced("third", &trace)),
        )]);
        let mut counter = Counter::default();

        machine
            .transition(&mut counter, &CounterEvent::Start, &HookContext::new("alice"))
            .unwrap();

        assert_eq!(*trace.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn guard_failure_stops_everything() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let machine = counter_machine(vec![
            (
                CounterState::Idle,
                HookSet::new()
                    .guard(failing("deny", HookError::rejected("not allowed")))
                    .guard(traced("later-guard", &trace))
                    .before(traced("before", &trace))
                    .on_exit(traced("exit", &trace)),
            ),
            (
                CounterState::Counting,
                HookSet::new()
                    .on_enter(traced("enter", &trace))
                    .after(traced("after", &trace)),
            ),
        ]);
        let mut counter = Counter::default();
        let before = counter.clone();

        let result = machine.transition(&mut counter, &CounterEvent::Start, &HookContext::new("alice"));

        assert_eq!(
            result,
            Err(TransitionError::GuardRejected {
                state: CounterState::Idle,
                hook: "deny".to_string(),
                source: HookError::rejected("not allowed"),
            })
        );
        assert!(trace.lock().unwrap().is_empty());
        assert_eq!(counter, before);
    }

    #[test]
    fn before_failure_aborts_before_commit() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let machine = counter_machine(vec![(
            CounterState::Idle,
            HookSet::new()
                .before(failing("reserve", HookError::failed("no capacity")))
                .on_exit(traced("exit", &trace)),
        )]);
        let mut counter = Counter::default();

        let result = machine.transition(&mut counter, &CounterEvent::Start, &HookContext::new("alice"));

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            TransitionError::PreCommitActionFailed {
                phase: HookPhase::Before,
                ..
            }
        ));
        assert_eq!(err.resulting_state(), &CounterState::Idle);
        assert!(trace.lock().unwrap().is_empty());
        assert_eq!(counter.state, CounterState::Idle);
        assert!(counter.history.is_empty());
    }

    #[test]
    fn exit_failure_aborts_before_commit() {
        let machine = counter_machine(vec![(
            CounterState::Counting,
            HookSet::new().on_exit(failing("flush", HookError::failed("disk full"))),
        )]);
        let mut counter = Counter {
            state: CounterState::Counting,
            ..Counter::default()
        };

        let result = machine.transition(&mut counter, &CounterEvent::Finish, &HookContext::new("alice"));

        assert!(matches!(
            result,
            Err(TransitionError::PreCommitActionFailed {
                phase: HookPhase::Exit,
                ..
            })
        ));
        assert_eq!(counter.state, CounterState::Counting);
        assert!(counter.history.is_empty());
        assert!(counter.updated_at.is_none());
    }

    #[test]
    fn enter_failure_keeps_commit() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let machine = counter_machine(vec![(
            CounterState::Counting,
            HookSet::new()
                .on_enter(failing("provision", HookError::failed("quota")))
                .on_enter(traced("later-enter", &trace))
                .after(traced("after", &trace)),
        )]);
        let mut counter = Counter::default();

        let result = machine.transition(&mut counter, &CounterEvent::Start, &HookContext::new("alice"));

        let err = result.unwrap_err();
        assert_eq!(
            err,
            TransitionError::PostCommitActionFailed {
                state: CounterState::Counting,
                phase: HookPhase::Enter,
                hook: "provision".to_string(),
                source: HookError::failed("quota"),
            }
        );
        assert!(err.is_committed());
        assert!(trace.lock().unwrap().is_empty());
        assert_eq!(counter.state, CounterState::Counting);
        assert_eq!(counter.history.len(), 1);
    }

    #[test]
    fn after_failure_keeps_commit_and_skips_remaining() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let machine = counter_machine(vec![(
            CounterState::Done,
            HookSet::new()
                .on_enter(traced("enter", &trace))
                .after(failing("notify", HookError::failed("smtp down")))
                .after(traced("archive", &trace)),
        )]);
        let mut counter = Counter {
            state: CounterState::Counting,
            ..Counter::default()
        };

        let result = machine.transition(&mut counter, &CounterEvent::Finish, &HookContext::new("bob"));

        let err = result.unwrap_err();
        assert_eq!(err.resulting_state(), &CounterState::Done);
        assert_eq!(*trace.lock().unwrap(), vec!["enter"]);
        assert_eq!(counter.state, CounterState::Done);
        assert_eq!(counter.history.last().unwrap().triggered_by, "bob");
    }

    #[test]
    fn self_loop_runs_both_halves_of_the_node() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let machine = counter_machine(vec![(
            CounterState::Counting,
            HookSet::new()
                .guard(traced("guard", &trace))
                .before(traced("before", &trace))
                .on_exit(traced("exit", &trace))
                .on_enter(traced("enter", &trace))
                .after(traced("after", &trace)),
        )]);
        let mut counter = Counter {
            state: CounterState::Counting,
            ..Counter::default()
        };

        let result = machine.transition(&mut counter, &CounterEvent::Increment, &HookContext::new("alice"));

        assert_eq!(result, Ok(CounterState::Counting));
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["guard", "before", "exit", "enter", "after"]
        );
        assert_eq!(counter.history.len(), 1);
        assert!(counter.history.last().unwrap().is_self_loop());
    }

    #[test]
    fn event_counters_are_applied_at_commit() {
        let machine = counter_machine(vec![(
            CounterState::Counting,
            HookSet::new().after(FnHook::<Counter>::new("mirror", |counter, _, _| {
                counter.value = i64::from(counter.increments) * 10;
                Ok(())
            })),
        )]);
        let mut counter = Counter::default();
        let ctx = HookContext::new("alice");

        machine.transition(&mut counter, &CounterEvent::Start, &ctx).unwrap();
        machine.transition(&mut counter, &CounterEvent::Increment, &ctx).unwrap();
        machine.transition(&mut counter, &CounterEvent::Increment, &ctx).unwrap();

        assert_eq!(counter.increments, 2);
        assert_eq!(counter.value, 20);
        assert_eq!(counter.history.len(), 3);
    }

    #[test]
    fn cancellation_before_commit_aborts_cleanly() {
        let machine = counter_machine(vec![(
            CounterState::Idle,
            HookSet::new().before(FnHook::<Counter>::new("checkpoint", |_, _, ctx| {
                ctx.ensure_active()
            })),
        )]);
        let mut counter = Counter::default();
        let ctx = HookContext::new("alice");
        ctx.cancellation().cancel();

        let result = machine.transition(&mut counter, &CounterEvent::Start, &ctx);

        let err = result.unwrap_err();
        assert!(err.is_canceled());
        assert!(!err.is_committed());
        assert_eq!(counter.state, CounterState::Idle);
    }

    #[test]
    fn cancellation_after_commit_keeps_state_change() {
        let machine = counter_machine(vec![(
            CounterState::Counting,
            HookSet::new().after(FnHook::<Counter>::new("checkpoint", |_, _, ctx| {
                ctx.ensure_active()
            })),
        )]);
        let mut counter = Counter::default();
        let ctx = HookContext::new("alice");
        ctx.cancellation().cancel();

        let result = machine.transition(&mut counter, &CounterEvent::Start, &ctx);

        let err = result.unwrap_err();
        assert!(err.is_canceled());
        assert!(err.is_committed());
        assert_eq!(counter.state, CounterState::Counting);
        assert_eq!(counter.history.len(), 1);
    }

    #[test]
    fn queries_do_not_run_hooks() {
        let machine = counter_machine(vec![]);

        assert!(machine.can_fire(&CounterState::Counting, &CounterEvent::Increment));
        assert!(!machine.can_fire(&CounterState::Done, &CounterEvent::Start));
        assert_eq!(
            machine.next_state(&CounterState::Counting, &CounterEvent::Finish),
            Some(&CounterState::Done)
        );
        assert_eq!(machine.available_events(&CounterState::Idle), vec![&CounterEvent::Start]);
        assert!(machine.is_terminal(&CounterState::Done));
    }

    #[test]
    fn available_events_borrow_only_the_machine() {
        let machine = counter_machine(vec![]);

        let events = {
            let state = CounterState::Counting;
            machine.available_events(&state)
        };

        assert_eq!(events.len(), 2);
        assert!(events.contains(&&CounterEvent::Finish));
    }

    #[test]
    fn terminal_state_rejects_every_event() {
        let machine = counter_machine(vec![]);
        let mut counter = Counter {
            state: CounterState::Done,
            ..Counter::default()
        };

        for event in CounterEvent::ALL {
            let result = machine.transition(&mut counter, event, &HookContext::new("alice"));
            assert!(matches!(result, Err(TransitionError::InvalidTransition { .. })));
        }
        assert!(counter.history.is_empty());
    }
}
