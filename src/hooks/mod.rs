//! Hooks and the per-state registry that holds them.
//!
//! A hook is a named strategy object run at one point of a transition:
//!
//! - **Guards** veto an event on the source state
//! - **Before** and **exit** actions run on the source state before commit
//! - **Enter** and **after** actions run on the destination state after commit
//!
//! Hooks receive the entity, the event and a [`HookContext`] carrying the
//! actor identity plus the caller's cancellation and deadline signals.

mod context;
mod error;
mod hook;
mod node;
mod registry;

pub use context::{CancellationToken, HookContext};
pub use error::{HookError, HookPhase};
pub use hook::{FnHook, Hook, SharedHook};
pub use node::{HookSet, Node};
pub use registry::HookRegistry;
