//! Around core — runtime dispatch for method-call interception.
//!
//! Wraps every invocation of an arbitrary target with symmetric
//! before/after hooks, across four call-result shapes:
//!
//! 1. **Classification** (`shape`): declared return type -> `ResultShape`
//! 2. **Invocables** (`invocable`): the erased call protocol + adapters
//! 3. **Dispatch** (`dispatch`): hook ordering, awaiting, failure
//!    pass-through
//! 4. **Hooks** (`hook`): the before/after contract
//! 5. **Registration** (`registry`): explicit decorator-style attachment
//!
//! Target failures are propagated untouched; the interception layer is
//! invisible in the failure channel.

pub mod dispatch;
pub mod error;
pub mod hook;
pub mod invocable;
pub mod registry;
pub mod shape;

mod strategy;

// Re-export key types for convenient access.
pub use dispatch::Dispatcher;
pub use error::{DispatchError, RegistryError};
pub use hook::{CallInfo, Hooks, NoopHooks, TraceHooks};
pub use invocable::{arg, ArgList, BoxedValue, Invocable, Outcome, PendingOutcome, TargetOutput};
pub use registry::{CallSiteRegistry, InterceptedCall};
pub use shape::{classify, ResultShape, ReturnType, TypeDesc};
