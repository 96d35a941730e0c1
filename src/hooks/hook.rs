//! The hook capability interface.

use super::context::HookContext;
use super::error::HookError;
use crate::core::Entity;
use std::fmt;
use std::sync::Arc;

/// A named unit of logic run at one point of the transition pipeline.
///
/// Implementations are strategy objects: they hold their configuration and
/// nothing else. Everything they read or change lives on the entity, so a
/// single hook instance can be shared by any number of machines and
/// transitions.
///
/// # Example
///
/// ```rust
/// use hookflow::core::Entity;
/// use hookflow::hooks::{Hook, HookContext, HookError};
///
/// struct RequireActor {
///     actor: String,
/// }
///
/// impl<E: Entity> Hook<E> for RequireActor {
///     fn name(&self) -> &str {
///         "RequireActor"
///     }
///
///     fn execute(&self, _entity: &mut E, _event: &E::Event, ctx: &HookContext) -> Result<(), HookError> {
///         if ctx.actor() == self.actor {
///             Ok(())
///         } else {
///             Err(HookError::rejected(format!("only {} may do this", self.actor)))
///         }
///     }
/// }
/// ```
pub trait Hook<E: Entity>: Send + Sync {
    /// Name reported in errors.
    fn name(&self) -> &str;

    fn execute(
        &self,
        entity: &mut E,
        event: &E::Event,
        ctx: &HookContext,
    ) -> Result<(), HookError>;
}

/// Hooks are stored behind `Arc` so one instance can sit in many lists.
pub type SharedHook<E> = Arc<dyn Hook<E>>;

type HookFn<E> = dyn Fn(&mut E, &<E as Entity>::Event, &HookContext) -> Result<(), HookError>
    + Send
    + Sync;

/// Hook built from a closure.
///
/// Handy for tests and one-off hooks. The closure should not capture
/// mutable state; put whatever it needs to change on the entity.
pub struct FnHook<E: Entity> {
    name: String,
    body: Box<HookFn<E>>,
}

impl<E: Entity> FnHook<E> {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut E, &E::Event, &HookContext) -> Result<(), HookError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }
}

impl<E: Entity> Hook<E> for FnHook<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        entity: &mut E,
        event: &E::Event,
        ctx: &HookContext,
    ) -> Result<(), HookError> {
        (self.body)(entity, event, ctx)
    }
}

impl<E: Entity> fmt::Debug for FnHook<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook").field("name", &self.name).finish()
    }
}
