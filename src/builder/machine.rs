//! Builder for constructing state machines.

use crate::builder::error::{BuildError, ConfigViolation};
use crate::core::{Entity, State};
use crate::engine::StateMachine;
use crate::hooks::{HookRegistry, HookSet};
use crate::table::{TableError, TransitionTable};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Builder for constructing state machines with a fluent API.
///
/// Nothing is validated until [`MachineBuilder::build`], which reports
/// every problem in the configuration at once:
///
/// - at least one state must be declared
/// - every state named by a transition or a hook registration must be declared
/// - each `(state, event)` pair may be registered only once
///
/// Every declared state gets a node in the registry, even if no hooks are
/// registered for it.
///
/// # Example
///
/// ```rust
/// use hookflow::builder::MachineBuilder;
/// use hookflow::core::{Entity, TransitionHistory};
/// use hookflow::{event_enum, state_enum};
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// event_enum! {
///     enum Signal {
///         Go,
///         Stop,
///     }
/// }
///
/// struct Crossing {
///     light: Light,
///     history: TransitionHistory<Light, Signal>,
/// }
///
/// impl Entity for Crossing {
///     type State = Light;
///     type Event = Signal;
///     fn state(&self) -> &Light { &self.light }
///     fn set_state(&mut self, light: Light) { self.light = light; }
///     fn touch(&mut self, _at: chrono::DateTime<chrono::Utc>) {}
///     fn history(&self) -> &TransitionHistory<Light, Signal> { &self.history }
///     fn history_mut(&mut self) -> &mut TransitionHistory<Light, Signal> { &mut self.history }
/// }
///
/// let machine = MachineBuilder::<Crossing>::new()
///     .states(Light::ALL.iter().copied())
///     .transition(Light::Red, Signal::Go, Light::Green)
///     .transition(Light::Green, Signal::Stop, Light::Red)
///     .build()
///     .unwrap();
///
/// assert!(machine.can_fire(&Light::Red, &Signal::Go));
/// ```
pub struct MachineBuilder<E: Entity> {
    states: Vec<E::State>,
    transitions: Vec<(E::State, E::Event, E::State)>,
    hooks: Vec<(E::State, HookSet<E>)>,
}

impl<E: Entity> MachineBuilder<E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Declare one state.
    pub fn state(mut self, state: E::State) -> Self {
        self.states.push(state);
        self
    }

    /// Declare the closed set of states.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = E::State>,
    {
        self.states.extend(states);
        self
    }

    /// Register `from --event--> to`.
    pub fn transition(mut self, from: E::State, event: E::Event, to: E::State) -> Self {
        self.transitions.push((from, event, to));
        self
    }

    /// Append hooks to the node of `state`.
    pub fn hooks(mut self, state: E::State, set: HookSet<E>) -> Self {
        self.hooks.push((state, set));
        self
    }

    /// Validate the configuration and build the machine.
    pub fn build(self) -> Result<StateMachine<E>, BuildError> {
        let declared: HashSet<E::State> = self.states.iter().cloned().collect();
        let mut checks: Vec<Check> = Vec::new();

        if declared.is_empty() {
            checks.push(Validation::fail(ConfigViolation::NoStates));
        }

        let mut table = TransitionTable::new();
        for (from, event, to) in self.transitions {
            checks.push(check_declared(&declared, &from, "a transition source"));
            checks.push(check_declared(&declared, &to, "a transition destination"));

            let rejected = to.name().to_string();
            let check = match table.insert(from, event, to) {
                Ok(()) => Validation::success(()),
                Err(TableError::Duplicate {
                    from,
                    event,
                    existing,
                }) => Validation::fail(ConfigViolation::DuplicateTransition {
                    from,
                    event,
                    existing,
                    rejected,
                }),
            };
            checks.push(check);
        }

        for (state, _) in &self.hooks {
            checks.push(check_declared(&declared, state, "a hook registration"));
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks).map(|_| ()) {
            return Err(BuildError::InvalidConfiguration {
                violations: errors.iter().cloned().collect(),
            });
        }

        let mut registry = HookRegistry::new();
        for state in self.states {
            registry.ensure_node(state);
        }
        for (state, set) in self.hooks {
            registry.register(state, set);
        }

        Ok(StateMachine::from_parts(table, registry))
    }
}

impl<E: Entity> Default for MachineBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_declared<S: State>(declared: &HashSet<S>, state: &S, used_in: &'static str) -> Check {
    if declared.contains(state) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::UndeclaredState {
            state: state.name().to_string(),
            used_in,
        })
    }
}
