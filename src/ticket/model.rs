//! Support ticket entity.

use crate::core::{Entity, Event, State, TransitionHistory};
use crate::{event_enum, state_enum};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use uuid::Uuid;

state_enum! {
    /// Lifecycle of a support ticket.
    pub enum TicketState {
        New,
        Pending,
        InitialReview,
        InProgress,
        FinalApproval,
        Completed,
        Closed,
        Canceled,
    }
    final: [Closed, Canceled]
    error: [Canceled]
}

event_enum! {
    /// Stimuli a ticket can receive.
    pub enum TicketEvent {
        Submit,
        Assign,
        ApproveInitial,
        RejectInitial,
        DenyInitial,
        SubmitFinal,
        ApproveFinal,
        RejectFinal,
        Archive,
        Cancel,
        Reassign,
        Hold,
        Resume,
    }
}

pub type TicketHistory = TransitionHistory<TicketState, TicketEvent>;

/// A support ticket.
///
/// `reassign_count` is bumped by the engine on every committed `Reassign`;
/// `priority` is left to hooks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub initial_priority: i64,
    pub reassign_count: u32,
    pub current_state: TicketState,
    pub creator_id: String,
    pub assignee_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub history: TicketHistory,
}

impl Ticket {
    /// Open a new ticket in `New` with a fresh id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: i64,
        creator_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            priority,
            initial_priority: priority,
            reassign_count: 0,
            current_state: TicketState::New,
            creator_id: creator_id.into(),
            assignee_id: String::new(),
            created_at: now,
            updated_at: now,
            history: TransitionHistory::new(),
        }
    }

    /// Priority the ticket should have given how often it changed hands.
    pub fn escalated_priority(&self) -> i64 {
        self.initial_priority
            .saturating_add(i64::from(self.reassign_count))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render the audit trail as a fixed-width table.
    pub fn history_table(&self) -> String {
        let mut out = String::new();
        if self.history.is_empty() {
            let _ = writeln!(out, "ticket {} has no history", self.id);
            return out;
        }

        let rule = "-".repeat(80);
        let _ = writeln!(
            out,
            "history of ticket {} (initial priority: {}, priority: {}, reassigned: {}):",
            self.id, self.initial_priority, self.priority, self.reassign_count
        );
        let _ = writeln!(
            out,
            "{:<19} | {:<15} | {:<17} | {:<17} | triggered by",
            "time", "event", "from", "to"
        );
        let _ = writeln!(out, "{rule}");
        for record in self.history.records() {
            let _ = writeln!(
                out,
                "{} | {:<15} | {:<17} | {:<17} | {}",
                record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                record.event.name(),
                record.from.name(),
                record.to.name(),
                record.triggered_by
            );
        }
        let _ = writeln!(out, "{rule}");
        out
    }
}

impl Entity for Ticket {
    type State = TicketState;
    type Event = TicketEvent;

    fn state(&self) -> &TicketState {
        &self.current_state
    }

    fn set_state(&mut self, state: TicketState) {
        self.current_state = state;
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn history(&self) -> &TicketHistory {
        &self.history
    }

    fn history_mut(&mut self) -> &mut TicketHistory {
        &mut self.history
    }

    fn apply_event_counters(&mut self, event: &TicketEvent) {
        if *event == TicketEvent::Reassign {
            self.reassign_count += 1;
        }
    }
}
