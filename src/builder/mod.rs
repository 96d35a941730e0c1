//! Setup API for state machines.
//!
//! [`MachineBuilder`] collects states, transitions and hook sets, then
//! validates the whole configuration at once. The `state_enum!` and
//! `event_enum!` macros remove the boilerplate of the marker traits.

mod error;
mod machine;
mod macros;

pub use error::{BuildError, ConfigViolation};
pub use machine::MachineBuilder;
