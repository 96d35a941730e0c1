//! Core state machine types.
//!
//! This module contains the plain data the engine works with:
//! - States and events via the `State` and `Event` traits
//! - The `Entity` contract the engine mutates
//! - Append-only transition history

mod entity;
mod event;
mod history;
mod state;

pub use entity::Entity;
pub use event::Event;
pub use history::{HistoryRecord, TransitionHistory};
pub use state::State;
