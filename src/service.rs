//! Ticket service: load, transition, persist.

use crate::builder::BuildError;
use crate::engine::{StateMachine, TransitionError};
use crate::hooks::HookContext;
use crate::store::{StoreError, TicketStore};
use crate::ticket::{ticket_machine, Ticket, TicketEvent, TicketState, WorkflowConfig};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transition(#[from] TransitionError<TicketState>),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl ServiceError {
    /// The transition failure, if that is what went wrong.
    pub fn transition_error(&self) -> Option<&TransitionError<TicketState>> {
        match self {
            Self::Transition(error) => Some(error),
            _ => None,
        }
    }
}

/// Runs ticket transitions against a store.
///
/// The machine is shared, so cloning the `Arc` into several services (or
/// tasks) costs nothing. Transitions on the same ticket id must still be
/// serialized by the caller.
pub struct TicketService<St: TicketStore> {
    machine: Arc<StateMachine<Ticket>>,
    store: St,
}

impl<St: TicketStore> TicketService<St> {
    pub fn new(machine: Arc<StateMachine<Ticket>>, store: St) -> Self {
        Self { machine, store }
    }

    /// Build the standard ticket machine from `config`.
    pub fn with_config(config: &WorkflowConfig, store: St) -> Result<Self, ServiceError> {
        let machine = ticket_machine(config)?;
        Ok(Self::new(Arc::new(machine), store))
    }

    pub fn machine(&self) -> &Arc<StateMachine<Ticket>> {
        &self.machine
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Persist a new ticket and return its id.
    pub fn create(&self, ticket: Ticket) -> Result<String, ServiceError> {
        self.store.save(&ticket)?;
        debug!(ticket = %ticket.id, priority = ticket.priority, "ticket created");
        Ok(ticket.id)
    }

    pub fn get(&self, id: &str) -> Result<Ticket, ServiceError> {
        Ok(self.store.load(id)?)
    }

    /// Fire `event` on ticket `id` on behalf of `actor`.
    pub fn transition_ticket(
        &self,
        id: &str,
        event: TicketEvent,
        actor: &str,
    ) -> Result<Ticket, ServiceError> {
        self.transition_ticket_with(id, event, &HookContext::new(actor))
    }

    /// Like [`transition_ticket`](Self::transition_ticket) with a caller
    /// supplied context, e.g. one carrying a deadline.
    ///
    /// The actor becomes the ticket's assignee. The ticket is saved when the
    /// transition committed, which includes a failing enter or after hook;
    /// the error is still returned in that case.
    pub fn transition_ticket_with(
        &self,
        id: &str,
        event: TicketEvent,
        ctx: &HookContext,
    ) -> Result<Ticket, ServiceError> {
        let mut ticket = self.store.load(id)?;
        ticket.assignee_id = ctx.actor().to_string();

        match self.machine.transition(&mut ticket, &event, ctx) {
            Ok(state) => {
                ticket.updated_at = Utc::now();
                self.store.save(&ticket)?;
                debug!(
                    ticket = %ticket.id,
                    %event,
                    %state,
                    priority = ticket.priority,
                    "ticket saved"
                );
                Ok(ticket)
            }
            Err(error) if error.is_committed() => {
                ticket.updated_at = Utc::now();
                self.store.save(&ticket)?;
                warn!(ticket = %ticket.id, %event, %error, "ticket saved after hook failure");
                Err(error.into())
            }
            Err(error) => {
                debug!(ticket = %ticket.id, %event, %error, "transition refused");
                Err(error.into())
            }
        }
    }
}
