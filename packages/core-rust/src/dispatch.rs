//! The dispatcher: single public entry point of the interception core.

use std::sync::Arc;

use tracing::debug;

use crate::error::DispatchError;
use crate::hook::{CallInfo, Hooks, NoopHooks};
use crate::invocable::{ArgList, Invocable, Outcome};
use crate::shape::{classify, ResultShape, ReturnType};
use crate::strategy;

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Dispatches intercepted calls through the wrapping strategy selected by
/// the shape classifier.
///
/// The dispatcher holds no per-call state; concurrent dispatches are fully
/// independent units of work. Cloning is cheap and shares the hook set.
#[derive(Clone)]
pub struct Dispatcher {
    hooks: Arc<dyn Hooks>,
}

impl Dispatcher {
    /// Create a dispatcher with the given hooks.
    #[must_use]
    pub fn new(hooks: Arc<dyn Hooks>) -> Self {
        Self { hooks }
    }

    /// Dispatch one call through its wrapping strategy.
    ///
    /// Classifies `declared`, runs the before hook, invokes `target` with
    /// `args` (awaiting resolution for asynchronous shapes), runs the
    /// after hook on success, and returns the target's outcome.
    ///
    /// Synchronous shapes complete without yielding; asynchronous shapes
    /// suspend exactly once, on the target's pending computation.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Target`] when the target fails, synchronously or
    ///   on resolution. The original failure passes through untouched and
    ///   the after hook is skipped.
    /// - [`DispatchError::ShapeMismatch`] when the target's output does
    ///   not conform to `declared`.
    pub async fn dispatch(
        &self,
        name: &str,
        target: &mut dyn Invocable,
        args: ArgList,
        declared: ReturnType,
    ) -> Result<Outcome, DispatchError> {
        let shape = classify(declared);
        let call = CallInfo {
            name,
            declared,
            argc: args.len(),
        };
        debug!(call = name, shape = ?shape, "dispatching");

        let hooks = self.hooks.as_ref();
        match shape {
            ResultShape::SyncVoid => strategy::wrap_sync_void(hooks, &call, target, args),
            ResultShape::SyncValue(ty) => {
                strategy::wrap_sync_value(hooks, &call, target, args, ty)
            }
            ResultShape::AsyncVoid => {
                strategy::wrap_async_void(hooks, &call, target, args).await
            }
            ResultShape::AsyncValue(ty) => {
                strategy::wrap_async_value(hooks, &call, target, args, ty).await
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(NoopHooks))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
