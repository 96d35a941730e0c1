//! Ticket Lifecycle
//!
//! Walks one support ticket from submission to final approval through the
//! ticket service.
//!
//! Key concepts:
//! - Hooks attached per state (notifications, priority escalation, guards)
//! - Reassignments bumping the ticket priority
//! - A guard refusing final approval from anyone but the configured approver
//! - The audit trail left by committed transitions
//!
//! Run with: RUST_LOG=debug cargo run --example ticket_lifecycle

use hookflow::service::TicketService;
use hookflow::store::MemoryStore;
use hookflow::ticket::{Ticket, TicketEvent, WorkflowConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Ticket Lifecycle ===\n");

    let service = TicketService::with_config(&WorkflowConfig::default(), MemoryStore::new())?;
    let id = service.create(Ticket::new("Server down", "The server does not boot", 1, "user123"))?;

    let steps = [
        (TicketEvent::Submit, "user123"),
        (TicketEvent::Assign, "user456"),
        (TicketEvent::ApproveInitial, "user456"),
        (TicketEvent::Reassign, "user789"),
        (TicketEvent::Reassign, "user999"),
        (TicketEvent::SubmitFinal, "user999"),
    ];
    for (event, actor) in steps {
        let ticket = service.transition_ticket(&id, event, actor)?;
        println!(
            "{event:<15} by {actor:<8} -> {} (priority {})",
            ticket.current_state, ticket.priority
        );
    }

    println!("\nApproveFinal by user999:");
    match service.transition_ticket(&id, TicketEvent::ApproveFinal, "user999") {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(error) => println!("  refused: {error}"),
    }

    let ticket = service.transition_ticket(&id, TicketEvent::ApproveFinal, "admin")?;
    println!("ApproveFinal by admin -> {}\n", ticket.current_state);

    print!("{}", service.get(&id)?.history_table());

    println!("\n=== Example Complete ===");
    Ok(())
}
