//! The four wrapping strategies, one per result shape.
//!
//! Each strategy runs the before hook, invokes the target, and runs the
//! after hook once the target's result is available. On any target failure
//! the after hook is skipped and the failure propagates unchanged.

use crate::error::DispatchError;
use crate::hook::{CallInfo, Hooks};
use crate::invocable::{ArgList, Invocable, Outcome, TargetOutput};
use crate::shape::TypeDesc;

/// Short description of a target output, for mismatch diagnostics.
fn describe(output: &TargetOutput) -> &'static str {
    match output {
        TargetOutput::Ready(Outcome::Void) => "no value",
        TargetOutput::Ready(Outcome::Value(_)) => "an immediate value",
        TargetOutput::Pending(_) => "a pending computation",
    }
}

fn mismatch(call: &CallInfo<'_>, actual: &'static str) -> DispatchError {
    DispatchError::ShapeMismatch {
        call: call.name.to_string(),
        declared: call.declared,
        actual,
    }
}

/// Wrap a synchronous call site declaring no result.
///
/// An immediate value under a void declaration is discarded; a pending
/// computation is a shape mismatch, since dropping a live future would
/// silently cancel it.
pub(crate) fn wrap_sync_void(
    hooks: &dyn Hooks,
    call: &CallInfo<'_>,
    target: &mut dyn Invocable,
    args: ArgList,
) -> Result<Outcome, DispatchError> {
    hooks.before(call);
    let output = target.invoke(args)?;
    match output {
        TargetOutput::Ready(_) => {
            hooks.after(call);
            Ok(Outcome::Void)
        }
        TargetOutput::Pending(_) => Err(mismatch(call, "a pending computation")),
    }
}

/// Wrap a synchronous call site declaring a value of type `ty`.
pub(crate) fn wrap_sync_value(
    hooks: &dyn Hooks,
    call: &CallInfo<'_>,
    target: &mut dyn Invocable,
    args: ArgList,
    ty: TypeDesc,
) -> Result<Outcome, DispatchError> {
    hooks.before(call);
    let output = target.invoke(args)?;
    match output {
        TargetOutput::Ready(Outcome::Value(value)) => {
            if !ty.matches(value.as_ref()) {
                return Err(mismatch(call, "a value of a different type"));
            }
            hooks.after(call);
            Ok(Outcome::Value(value))
        }
        other => Err(mismatch(call, describe(&other))),
    }
}

/// Wrap an asynchronous call site with no meaningful resolved value.
///
/// Suspends exactly once, on the target's pending computation; a resolved
/// value, if any, is discarded.
pub(crate) async fn wrap_async_void(
    hooks: &dyn Hooks,
    call: &CallInfo<'_>,
    target: &mut dyn Invocable,
    args: ArgList,
) -> Result<Outcome, DispatchError> {
    hooks.before(call);
    let output = target.invoke(args)?;
    let pending = match output {
        TargetOutput::Pending(pending) => pending,
        ready => return Err(mismatch(call, describe(&ready))),
    };
    pending.await?;
    hooks.after(call);
    Ok(Outcome::Void)
}

/// Wrap an asynchronous call site resolving to a value.
///
/// `ty` is `None` when the resolved type cannot be determined; the
/// resolved value then passes through unchecked.
pub(crate) async fn wrap_async_value(
    hooks: &dyn Hooks,
    call: &CallInfo<'_>,
    target: &mut dyn Invocable,
    args: ArgList,
    ty: Option<TypeDesc>,
) -> Result<Outcome, DispatchError> {
    hooks.before(call);
    let output = target.invoke(args)?;
    let pending = match output {
        TargetOutput::Pending(pending) => pending,
        ready => return Err(mismatch(call, describe(&ready))),
    };
    let resolved = pending.await?;
    match resolved {
        Outcome::Value(value) => {
            if let Some(ty) = ty {
                if !ty.matches(value.as_ref()) {
                    return Err(mismatch(call, "a value of a different type"));
                }
            }
            hooks.after(call);
            Ok(Outcome::Value(value))
        }
        Outcome::Void => Err(mismatch(call, "no resolved value")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
