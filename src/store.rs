//! Ticket persistence.
//!
//! The service talks to storage only through [`TicketStore`]. The bundled
//! [`MemoryStore`] keeps each ticket as an encoded snapshot, so a loaded
//! ticket never aliases one held by another caller.

use crate::ticket::Ticket;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ticket '{id}' not found")]
    NotFound { id: String },

    #[error("failed to encode or decode ticket: {0}")]
    Codec(#[from] bincode::Error),

    #[error("ticket store lock poisoned")]
    Poisoned,
}

/// Load and save tickets by id.
pub trait TicketStore: Send + Sync {
    fn load(&self, id: &str) -> Result<Ticket, StoreError>;

    /// Insert or replace the ticket stored under `ticket.id`.
    fn save(&self, ticket: &Ticket) -> Result<(), StoreError>;
}

/// In-process store holding bincode snapshots.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tickets: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let tickets = self.tickets.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tickets.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl TicketStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Ticket, StoreError> {
        let tickets = self.tickets.read().map_err(|_| StoreError::Poisoned)?;
        let bytes = tickets
            .get(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        Ok(bincode::deserialize(bytes)?)
    }

    fn save(&self, ticket: &Ticket) -> Result<(), StoreError> {
        let bytes = bincode::serialize(ticket)?;
        self.tickets
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(ticket.id.clone(), bytes);
        Ok(())
    }
}
