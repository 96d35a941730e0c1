//! Hook outcomes and pipeline phases.

use std::fmt;
use thiserror::Error;

/// Failure returned by a hook.
///
/// The engine never inspects the variant; it only records which hook in
/// which phase failed and reports it to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HookError {
    /// A precondition vetoed the event
    #[error("rejected: {reason}")]
    Rejected { reason: String },

    /// A side effect could not be carried out
    #[error("failed: {reason}")]
    Failed { reason: String },

    /// The caller canceled the transition
    #[error("canceled")]
    Canceled,

    /// The caller's deadline passed before the hook finished
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl HookError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// The five hook lists of a node, in the order the engine runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// Preconditions on the source state
    Guard,
    /// Actions on the source state before it is left
    Before,
    /// Actions fired when leaving the source state
    Exit,
    /// Actions fired when entering the destination state
    Enter,
    /// Actions on the destination state after it is entered
    After,
}

impl HookPhase {
    pub const ALL: [HookPhase; 5] = [
        HookPhase::Guard,
        HookPhase::Before,
        HookPhase::Exit,
        HookPhase::Enter,
        HookPhase::After,
    ];

    /// Phases that run before the entity is mutated.
    pub fn is_pre_commit(self) -> bool {
        matches!(self, Self::Guard | Self::Before | Self::Exit)
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Guard => "guard",
            Self::Before => "before",
            Self::Exit => "exit",
            Self::Enter => "enter",
            Self::After => "after",
        };
        f.write_str(name)
    }
}
