//! Support ticket workflow built on the engine.
//!
//! Provides the ticket entity, its closed state and event sets, the hook
//! strategies of the reference workflow, and the setup routine wiring them
//! into a [`StateMachine`](crate::engine::StateMachine).

mod config;
mod hooks;
mod model;
mod workflow;

pub use config::{ConfigError, WorkflowConfig};
pub use hooks::{LogPhase, NotifyOnEvent, RecomputePriority, RequireActor};
pub use model::{Ticket, TicketEvent, TicketHistory, TicketState};
pub use workflow::{ticket_builder, ticket_machine, TICKET_TRANSITIONS};
