//! Error taxonomy for the dispatch layer.

use crate::shape::ReturnType;

// ---------------------------------------------------------------------------
// DispatchError
// ---------------------------------------------------------------------------

/// Errors surfaced by [`crate::dispatch::Dispatcher::dispatch`].
///
/// Target failures pass through transparently: the caller observes the
/// same failure the target raised, with no dispatch-layer wrapping, and
/// can downcast it to the concrete error type. Shape mismatches are
/// integration programming errors and are reported distinctly so they can
/// never be confused with a target failure.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The target itself failed, synchronously or on resolution of its
    /// pending computation. Carries the original failure untouched.
    #[error(transparent)]
    Target(#[from] anyhow::Error),

    /// The target's output does not conform to the declared return type.
    #[error("call site `{call}` declared {declared} but produced {actual}")]
    ShapeMismatch {
        /// Call-site name supplied by the host.
        call: String,
        /// Declared return type of the call site.
        declared: ReturnType,
        /// Short description of what the target actually produced.
        actual: &'static str,
    },
}

impl DispatchError {
    /// The original target failure, when this is a target failure.
    #[must_use]
    pub fn as_target(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Target(err) => Some(err),
            Self::ShapeMismatch { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors surfaced by [`crate::registry::CallSiteRegistry::call`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No call site is registered under the given name.
    #[error("unknown call site: {name}")]
    UnknownCallSite {
        /// The name that was looked up.
        name: String,
    },

    /// The dispatch itself failed; passes through transparently.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
