//! Execution context forwarded to every hook.

use super::error::HookError;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub use tokio_util::sync::CancellationToken;

/// Context for one transition call.
///
/// Carries the identity of the actor that triggered the transition (it
/// ends up in the history record) and the caller's cancellation and
/// deadline signals. The engine does not act on cancellation itself; hooks
/// call [`HookContext::ensure_active`] and fail fast.
#[derive(Clone, Debug)]
pub struct HookContext {
    actor: String,
    cancellation: CancellationToken,
    deadline: Option<DateTime<Utc>>,
    started_at: DateTime<Utc>,
}

impl HookContext {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            cancellation: CancellationToken::new(),
            deadline: None,
            started_at: Utc::now(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline relative to when the context was created.
    ///
    /// A timeout too large to represent leaves the context without a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = chrono::Duration::from_std(timeout)
            .ok()
            .and_then(|timeout| self.started_at.checked_add_signed(timeout));
        self
    }

    /// Identity recorded as `triggered_by`.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_canceled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Utc::now() >= deadline)
    }

    /// Calculate elapsed time since the context was created.
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Fail with `Canceled` or `DeadlineExceeded` when the caller gave up.
    pub fn ensure_active(&self) -> Result<(), HookError> {
        if self.is_canceled() {
            return Err(HookError::Canceled);
        }
        if self.is_expired() {
            return Err(HookError::DeadlineExceeded);
        }
        Ok(())
    }
}
