//! Hook strategies for the ticket workflow.
//!
//! Each hook holds only its configuration. Anything it changes lives on
//! the ticket, and anything it reports goes through `tracing`.

use super::model::{Ticket, TicketEvent};
use crate::core::{Event, State};
use crate::hooks::{Hook, HookContext, HookError};
use tracing::{debug, info};

/// Emit a notification when one of `events` fires.
#[derive(Clone, Debug)]
pub struct NotifyOnEvent {
    name: String,
    events: Vec<TicketEvent>,
    message: String,
}

impl NotifyOnEvent {
    pub fn new(name: impl Into<String>, events: Vec<TicketEvent>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events,
            message: message.into(),
        }
    }
}

impl Hook<Ticket> for NotifyOnEvent {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        ticket: &mut Ticket,
        event: &TicketEvent,
        ctx: &HookContext,
    ) -> Result<(), HookError> {
        if !self.events.contains(event) {
            return Ok(());
        }
        ctx.ensure_active()?;
        info!(
            ticket = %ticket.id,
            event = event.name(),
            assignee = %ticket.assignee_id,
            "{}",
            self.message
        );
        Ok(())
    }
}

/// Record that a ticket passed through a point of the pipeline.
#[derive(Clone, Debug)]
pub struct LogPhase {
    name: String,
}

impl LogPhase {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Hook<Ticket> for LogPhase {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        ticket: &mut Ticket,
        event: &TicketEvent,
        _ctx: &HookContext,
    ) -> Result<(), HookError> {
        debug!(
            hook = %self.name,
            ticket = %ticket.id,
            state = ticket.current_state.name(),
            event = event.name(),
            "ticket lifecycle checkpoint"
        );
        Ok(())
    }
}

/// Set `priority` to `initial_priority + reassign_count` after one of
/// `events`.
#[derive(Clone, Debug)]
pub struct RecomputePriority {
    events: Vec<TicketEvent>,
}

impl RecomputePriority {
    pub fn new(events: Vec<TicketEvent>) -> Self {
        Self { events }
    }
}

impl Hook<Ticket> for RecomputePriority {
    fn name(&self) -> &str {
        "RecomputePriority"
    }

    fn execute(
        &self,
        ticket: &mut Ticket,
        event: &TicketEvent,
        _ctx: &HookContext,
    ) -> Result<(), HookError> {
        if !self.events.contains(event) {
            return Ok(());
        }
        let priority = ticket.escalated_priority();
        if priority != ticket.priority {
            ticket.priority = priority;
            info!(
                ticket = %ticket.id,
                priority,
                reassigned = ticket.reassign_count,
                "ticket priority updated"
            );
        }
        Ok(())
    }
}

/// Guard restricting `event` to a single actor.
///
/// Other events pass through untouched.
#[derive(Clone, Debug)]
pub struct RequireActor {
    event: TicketEvent,
    actor: String,
}

impl RequireActor {
    pub fn new(event: TicketEvent, actor: impl Into<String>) -> Self {
        Self {
            event,
            actor: actor.into(),
        }
    }
}

impl Hook<Ticket> for RequireActor {
    fn name(&self) -> &str {
        "RequireActor"
    }

    fn execute(
        &self,
        _ticket: &mut Ticket,
        event: &TicketEvent,
        ctx: &HookContext,
    ) -> Result<(), HookError> {
        if *event != self.event || ctx.actor() == self.actor {
            return Ok(());
        }
        Err(HookError::rejected(format!(
            "only {} may trigger {}",
            self.actor,
            event.name()
        )))
    }
}
