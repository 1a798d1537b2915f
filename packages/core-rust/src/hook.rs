//! Before/after hooks run symmetrically around every dispatched call.

use crate::shape::ReturnType;

// ---------------------------------------------------------------------------
// CallInfo
// ---------------------------------------------------------------------------

/// Per-dispatch call metadata handed to hooks.
#[derive(Debug, Clone, Copy)]
pub struct CallInfo<'a> {
    /// Call-site name supplied by the host.
    pub name: &'a str,
    /// Declared return type of the call site.
    pub declared: ReturnType,
    /// Number of arguments passed to the target.
    pub argc: usize,
}

// ---------------------------------------------------------------------------
// Hooks trait
// ---------------------------------------------------------------------------

/// Symmetric hooks bound to a dispatcher.
///
/// `before` runs strictly before the target is invoked; `after` runs
/// strictly after the target completed successfully, including resolution
/// of a pending computation. `after` never runs when the target fails.
///
/// Hooks receive shared references only and must not rely on any
/// cross-dispatch state held by the dispatcher; concurrent dispatches may
/// interleave hook invocations arbitrarily.
pub trait Hooks: Send + Sync {
    /// Called before the target is invoked.
    fn before(&self, _call: &CallInfo<'_>) {}

    /// Called after the target completed successfully.
    fn after(&self, _call: &CallInfo<'_>) {}
}

/// Hooks that do nothing. Dispatching through them is observably identical
/// to calling the target directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl Hooks for NoopHooks {}

/// Hooks that emit `tracing` debug events around every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceHooks;

impl Hooks for TraceHooks {
    fn before(&self, call: &CallInfo<'_>) {
        tracing::debug!(
            call = call.name,
            declared = %call.declared,
            argc = call.argc,
            "call starting"
        );
    }

    fn after(&self, call: &CallInfo<'_>) {
        tracing::debug!(call = call.name, "call completed");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
