//! The transition executor.
//!
//! A [`StateMachine`] resolves an event against its table, runs the source
//! node's guard, before and exit hooks, commits the state change with one
//! history record, then runs the destination node's enter and after hooks.
//! It never logs and never retries; every outcome goes back to the caller.

mod error;
mod machine;

pub use error::TransitionError;
pub use machine::StateMachine;
