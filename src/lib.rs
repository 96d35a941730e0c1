//! Hookflow: a hook-driven finite state machine engine.
//!
//! A [`StateMachine`] drives a stateful business entity through a fixed
//! transition table. Every state owns a node of hooks that run at set
//! points of each transition: guards and before/exit actions on the source
//! state before the change is committed, enter/after actions on the
//! destination state once it is. Each committed transition appends one
//! record to the entity's audit trail.
//!
//! # Core Concepts
//!
//! - **Entity**: the object being driven, exposing its state and history
//! - **Hooks**: named strategy objects run per state and phase
//! - **Table**: the `(state, event) -> state` map, validated at setup
//! - **History**: append-only record of committed transitions
//!
//! # Example
//!
//! ```rust
//! use hookflow::hooks::HookContext;
//! use hookflow::ticket::{ticket_machine, Ticket, TicketEvent, TicketState, WorkflowConfig};
//!
//! let machine = ticket_machine(&WorkflowConfig::default()).unwrap();
//! let mut ticket = Ticket::new("Printer jam", "Tray 2 is stuck", 1, "user123");
//!
//! let state = machine
//!     .transition(&mut ticket, &TicketEvent::Submit, &HookContext::new("user123"))
//!     .unwrap();
//!
//! assert_eq!(state, TicketState::Pending);
//! assert_eq!(ticket.history.len(), 1);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod hooks;
pub mod service;
pub mod store;
pub mod table;
pub mod ticket;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use core::{Entity, Event, HistoryRecord, State, TransitionHistory};
pub use engine::{StateMachine, TransitionError};
pub use hooks::{Hook, HookContext, HookError, HookSet};
