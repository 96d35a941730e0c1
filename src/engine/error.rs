//! Errors returned by a transition attempt.

use crate::core::State;
use crate::hooks::{HookError, HookPhase};
use thiserror::Error;

/// Why a transition did not complete cleanly.
///
/// Only [`TransitionError::PostCommitActionFailed`] is returned after the
/// entity has changed. For every other variant the entity is exactly as it
/// was before the call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError<S: State> {
    /// The table has no entry for the event in the current state
    #[error("event '{event}' is not accepted in state '{}'", .from.name())]
    InvalidTransition { from: S, event: String },

    /// A guard on the source state vetoed the event
    #[error("guard '{hook}' on state '{}' rejected the transition: {source}", .state.name())]
    GuardRejected {
        state: S,
        hook: String,
        source: HookError,
    },

    /// A before or exit action on the source state failed
    #[error("{phase} action '{hook}' on state '{}' failed before commit: {source}", .state.name())]
    PreCommitActionFailed {
        state: S,
        phase: HookPhase,
        hook: String,
        source: HookError,
    },

    /// An enter or after action on the destination state failed; the
    /// state change and its history record are already in place
    #[error("{phase} action '{hook}' on state '{}' failed after commit: {source}", .state.name())]
    PostCommitActionFailed {
        state: S,
        phase: HookPhase,
        hook: String,
        source: HookError,
    },
}

impl<S: State> TransitionError<S> {
    /// State the entity is in after the failed attempt.
    ///
    /// The source state for every pre-commit failure, the destination for
    /// a post-commit failure.
    pub fn resulting_state(&self) -> &S {
        match self {
            Self::InvalidTransition { from, .. } => from,
            Self::GuardRejected { state, .. }
            | Self::PreCommitActionFailed { state, .. }
            | Self::PostCommitActionFailed { state, .. } => state,
        }
    }

    /// True when the entity was changed despite the error.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::PostCommitActionFailed { .. })
    }

    /// The failure reported by the hook, if a hook caused the error.
    pub fn hook_error(&self) -> Option<&HookError> {
        match self {
            Self::InvalidTransition { .. } => None,
            Self::GuardRejected { source, .. }
            | Self::PreCommitActionFailed { source, .. }
            | Self::PostCommitActionFailed { source, .. } => Some(source),
        }
    }

    /// True when the hook failed because the caller canceled or timed out.
    pub fn is_canceled(&self) -> bool {
        matches!(
            self.hook_error(),
            Some(HookError::Canceled | HookError::DeadlineExceeded)
        )
    }
}
