//! The invocable abstraction: a unit of work callable with an argument
//! list, polymorphic over the four result shapes.
//!
//! The adapter constructors (`sync_void`, `sync_value`, `async_void`,
//! `async_value`) lift ordinary closures and futures into the erased
//! protocol; hosts rarely implement [`Invocable`] by hand.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// An argument or result value with its concrete type erased.
pub type BoxedValue = Box<dyn Any + Send>;

/// Ordered argument list, passed through to the target unchanged.
pub type ArgList = Vec<BoxedValue>;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of one dispatch: a value of the declared type, or no value for
/// the void shapes.
pub enum Outcome {
    /// The call produced no value.
    Void,
    /// The call produced a value of the declared type.
    Value(BoxedValue),
}

impl Outcome {
    /// Extract a value outcome as its concrete type.
    ///
    /// Returns `None` for void outcomes and for values that are not a `T`.
    #[must_use]
    pub fn into_value<T: Any>(self) -> Option<T> {
        match self {
            Self::Void => None,
            Self::Value(value) => value.downcast::<T>().ok().map(|boxed| *boxed),
        }
    }

    /// Whether this outcome carries no value.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("Void"),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// TargetOutput
// ---------------------------------------------------------------------------

/// An in-flight asynchronous computation that resolves to an [`Outcome`]
/// or fails.
pub type PendingOutcome = Pin<Box<dyn Future<Output = anyhow::Result<Outcome>> + Send>>;

/// What a target produced when invoked: an immediate outcome, or a pending
/// computation still to be awaited.
pub enum TargetOutput {
    /// The target completed synchronously.
    Ready(Outcome),
    /// The target started an asynchronous computation.
    Pending(PendingOutcome),
}

impl fmt::Debug for TargetOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(outcome) => write!(f, "Ready({outcome:?})"),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Invocable trait
// ---------------------------------------------------------------------------

/// A unit of work that can be called with an argument list.
///
/// The dispatcher borrows a target only for the duration of one dispatch
/// and never inspects or mutates the arguments.
pub trait Invocable: Send {
    /// Invoke the target with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns the target's own failure when it fails synchronously.
    fn invoke(&mut self, args: ArgList) -> anyhow::Result<TargetOutput>;
}

impl<F> Invocable for F
where
    F: FnMut(ArgList) -> anyhow::Result<TargetOutput> + Send,
{
    fn invoke(&mut self, args: ArgList) -> anyhow::Result<TargetOutput> {
        self(args)
    }
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

/// Box a single argument value.
#[must_use]
pub fn arg<T: Any + Send>(value: T) -> BoxedValue {
    Box::new(value)
}

/// Adapt a synchronous closure with no result into an [`Invocable`].
pub fn sync_void<F>(mut f: F) -> impl Invocable
where
    F: FnMut(&[BoxedValue]) -> anyhow::Result<()> + Send,
{
    move |args: ArgList| -> anyhow::Result<TargetOutput> {
        f(&args)?;
        Ok(TargetOutput::Ready(Outcome::Void))
    }
}

/// Adapt a synchronous closure returning a value into an [`Invocable`].
pub fn sync_value<T, F>(mut f: F) -> impl Invocable
where
    T: Any + Send,
    F: FnMut(&[BoxedValue]) -> anyhow::Result<T> + Send,
{
    move |args: ArgList| -> anyhow::Result<TargetOutput> {
        let value = f(&args)?;
        Ok(TargetOutput::Ready(Outcome::Value(Box::new(value))))
    }
}

/// Adapt a closure producing a future with no resolved value into an
/// [`Invocable`].
pub fn async_void<F, Fut>(mut f: F) -> impl Invocable
where
    F: FnMut(ArgList) -> Fut + Send,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    move |args: ArgList| -> anyhow::Result<TargetOutput> {
        let fut = f(args);
        Ok(TargetOutput::Pending(Box::pin(async move {
            fut.await?;
            Ok(Outcome::Void)
        })))
    }
}

/// Adapt a closure producing a future that resolves to a value into an
/// [`Invocable`].
pub fn async_value<T, F, Fut>(mut f: F) -> impl Invocable
where
    T: Any + Send,
    F: FnMut(ArgList) -> Fut + Send,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    move |args: ArgList| -> anyhow::Result<TargetOutput> {
        let fut = f(args);
        Ok(TargetOutput::Pending(Box::pin(async move {
            let value = fut.await?;
            Ok(Outcome::Value(Box::new(value) as BoxedValue))
        })))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
