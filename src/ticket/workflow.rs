//! Setup routine for the ticket state machine.

use super::config::WorkflowConfig;
use super::hooks::{LogPhase, NotifyOnEvent, RecomputePriority, RequireActor};
use super::model::{Ticket, TicketEvent, TicketState};
use crate::builder::{BuildError, MachineBuilder};
use crate::engine::StateMachine;
use crate::hooks::HookSet;

/// Every legal `(state, event) -> state` move of a ticket.
pub const TICKET_TRANSITIONS: &[(TicketState, TicketEvent, TicketState)] = &[
    (TicketState::New, TicketEvent::Submit, TicketState::Pending),
    (TicketState::Pending, TicketEvent::Assign, TicketState::InitialReview),
    (TicketState::Pending, TicketEvent::Cancel, TicketState::Canceled),
    (TicketState::InitialReview, TicketEvent::ApproveInitial, TicketState::InProgress),
    (TicketState::InitialReview, TicketEvent::RejectInitial, TicketState::New),
    (TicketState::InitialReview, TicketEvent::DenyInitial, TicketState::Canceled),
    (TicketState::InProgress, TicketEvent::SubmitFinal, TicketState::FinalApproval),
    (TicketState::InProgress, TicketEvent::Reassign, TicketState::InProgress),
    (TicketState::InProgress, TicketEvent::Hold, TicketState::InProgress),
    (TicketState::InProgress, TicketEvent::Resume, TicketState::InProgress),
    (TicketState::FinalApproval, TicketEvent::ApproveFinal, TicketState::Completed),
    (TicketState::FinalApproval, TicketEvent::RejectFinal, TicketState::InProgress),
    (TicketState::Completed, TicketEvent::Archive, TicketState::Closed),
];

/// Builder with every ticket state and transition but no hooks.
pub fn ticket_builder() -> MachineBuilder<Ticket> {
    TICKET_TRANSITIONS.iter().fold(
        MachineBuilder::new().states(TicketState::ALL.iter().copied()),
        |builder, (from, event, to)| builder.transition(*from, *event, *to),
    )
}

/// The ticket machine with the standard notification, priority and
/// approval hooks.
///
/// After hooks run on the state a transition enters, so each notification
/// sits on the destination of the event it reports.
pub fn ticket_machine(config: &WorkflowConfig) -> Result<StateMachine<Ticket>, BuildError> {
    ticket_builder()
        .hooks(
            TicketState::New,
            HookSet::new().after(NotifyOnEvent::new(
                "NotifyInitialRejected",
                vec![TicketEvent::RejectInitial],
                "initial review sent back, more details needed",
            )),
        )
        .hooks(
            TicketState::Pending,
            HookSet::new().on_exit(LogPhase::new("OnExitPending")),
        )
        .hooks(
            TicketState::InitialReview,
            HookSet::new()
                .on_enter(LogPhase::new("OnEnterInitialReview"))
                .after(NotifyOnEvent::new(
                    "NotifyAssign",
                    vec![TicketEvent::Assign],
                    "ticket claimed by reviewer",
                )),
        )
        .hooks(
            TicketState::InProgress,
            HookSet::new()
                .before(LogPhase::new("CheckInProgress"))
                .on_enter(LogPhase::new("OnEnterInProgress"))
                .after(NotifyOnEvent::new(
                    "NotifyInitialApproved",
                    vec![TicketEvent::ApproveInitial],
                    "initial review passed, work can start",
                ))
                .after(NotifyOnEvent::new(
                    "LogReassign",
                    vec![TicketEvent::Reassign],
                    "ticket handed over to new assignee",
                ))
                .after(RecomputePriority::new(config.priority_events.clone())),
        )
        .hooks(
            TicketState::FinalApproval,
            HookSet::new().guard(RequireActor::new(
                TicketEvent::ApproveFinal,
                config.final_approver.clone(),
            )),
        )
        .hooks(
            TicketState::Completed,
            HookSet::new().after(NotifyOnEvent::new(
                "NotifyFinalApproval",
                vec![TicketEvent::ApproveFinal],
                "final approval granted",
            )),
        )
        .build()
}
