//! Core State trait for state machine states.
//!
//! States are opaque labels. They carry no behavior of their own and are
//! used only as keys into the transition table and the hook registry.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// A named node of the state graph.
///
/// `Eq + Hash` let states key the transition table and hook registry;
/// `Serialize + Deserialize` let them travel inside a persisted entity.
/// Most enums get this impl from [`state_enum!`](crate::state_enum).
///
/// # Example
///
/// ```rust
/// use hookflow::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Shipment {
///     Packed,
///     InTransit,
///     Delivered,
/// }
///
/// impl State for Shipment {
///     fn name(&self) -> &str {
///         match self {
///             Self::Packed => "Packed",
///             Self::InTransit => "InTransit",
///             Self::Delivered => "Delivered",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Delivered)
///     }
/// }
///
/// assert!(Shipment::Delivered.is_final());
/// assert!(!Shipment::InTransit.is_error());
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Label used in history tables, logs and error messages.
    fn name(&self) -> &str;

    /// Informational; the engine treats a state as terminal only when the
    /// table has no outgoing entry for it.
    fn is_final(&self) -> bool {
        false
    }

    fn is_error(&self) -> bool {
        false
    }
}
