//! Event trait for external stimuli.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// An external stimulus that may or may not be accepted in a given state.
///
/// Events are drawn from a closed set known when the machine is built.
/// Whether an event is valid depends solely on the transition table.
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
