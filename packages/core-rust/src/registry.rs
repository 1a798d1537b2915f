//! Explicit call-site registration: decorator composition of interception
//! around named targets.
//!
//! The attachment step is visible in source: the host registers each
//! intercepted call site once, then invokes it by name. No weaving, no
//! implicit injection.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::dispatch::Dispatcher;
use crate::error::{DispatchError, RegistryError};
use crate::invocable::{ArgList, Invocable, Outcome};
use crate::shape::ReturnType;

// ---------------------------------------------------------------------------
// InterceptedCall
// ---------------------------------------------------------------------------

/// A registered call site whose invocations route through the dispatcher.
#[async_trait]
pub trait InterceptedCall: Send {
    /// Invoke the wrapped target with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error, with target failures passing through
    /// untouched.
    async fn call(&mut self, args: ArgList) -> Result<Outcome, DispatchError>;
}

/// Decorator binding one target and its declared return type to a
/// dispatcher.
struct WrappedCallSite<T> {
    name: &'static str,
    declared: ReturnType,
    target: T,
    dispatcher: Dispatcher,
}

#[async_trait]
impl<T: Invocable> InterceptedCall for WrappedCallSite<T> {
    async fn call(&mut self, args: ArgList) -> Result<Outcome, DispatchError> {
        self.dispatcher
            .dispatch(self.name, &mut self.target, args, self.declared)
            .await
    }
}

// ---------------------------------------------------------------------------
// CallSiteRegistry
// ---------------------------------------------------------------------------

/// Name-keyed registry of intercepted call sites sharing one dispatcher.
pub struct CallSiteRegistry {
    dispatcher: Dispatcher,
    sites: HashMap<&'static str, Box<dyn InterceptedCall>>,
}

impl CallSiteRegistry {
    /// Create a registry whose call sites share the given dispatcher.
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            sites: HashMap::new(),
        }
    }

    /// Register a call site under `name`, replacing any previous
    /// registration with the same name.
    pub fn register<T>(&mut self, name: &'static str, declared: ReturnType, target: T)
    where
        T: Invocable + 'static,
    {
        self.sites.insert(
            name,
            Box::new(WrappedCallSite {
                name,
                declared,
                target,
                dispatcher: self.dispatcher.clone(),
            }),
        );
    }

    /// Invoke the call site registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCallSite`] when nothing is
    /// registered under `name`; dispatch errors pass through transparently.
    pub async fn call(&mut self, name: &str, args: ArgList) -> Result<Outcome, RegistryError> {
        match self.sites.get_mut(name) {
            Some(site) => Ok(site.call(args).await?),
            None => Err(RegistryError::UnknownCallSite {
                name: name.to_string(),
            }),
        }
    }

    /// Whether a call site is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sites.contains_key(name)
    }
}

impl Default for CallSiteRegistry {
    fn default() -> Self {
        Self::new(Dispatcher::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::hook::{CallInfo, Hooks};
    use crate::invocable::{self, arg, BoxedValue};
    use crate::shape::TypeDesc;

    /// Hooks that append sequence markers to a shared log.
    struct RecordingHooks {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Hooks for RecordingHooks {
        fn before(&self, call: &CallInfo<'_>) {
            self.log.lock().push(format!("before:{}", call.name));
        }

        fn after(&self, call: &CallInfo<'_>) {
            self.log.lock().push(format!("after:{}", call.name));
        }
    }

    fn recording_registry() -> (CallSiteRegistry, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let hooks = Arc::new(RecordingHooks { log: log.clone() });
        (CallSiteRegistry::new(Dispatcher::new(hooks)), log)
    }

    #[derive(Debug, thiserror::Error)]
    #[error("backend unavailable")]
    struct BackendUnavailable;

    #[tokio::test]
    async fn registered_site_routes_through_hooks() {
        let (mut registry, log) = recording_registry();
        registry.register(
            "greet",
            ReturnType::Value(TypeDesc::of::<String>()),
            invocable::sync_value(|args: &[BoxedValue]| {
                let who = args[0].downcast_ref::<String>().cloned().unwrap_or_default();
                Ok(format!("hello {who}"))
            }),
        );

        let outcome = registry
            .call("greet", vec![arg("world".to_string())])
            .await
            .unwrap();
        assert_eq!(outcome.into_value::<String>().as_deref(), Some("hello world"));
        assert_eq!(*log.lock(), vec!["before:greet", "after:greet"]);
    }

    #[tokio::test]
    async fn async_site_awaits_before_after_hook() {
        let (mut registry, log) = recording_registry();
        let inner = log.clone();
        registry.register(
            "sync-up",
            ReturnType::Future,
            invocable::async_void(move |_args: ArgList| {
                let inner = inner.clone();
                async move {
                    tokio::task::yield_now().await;
                    inner.lock().push("target".to_string());
                    Ok(())
                }
            }),
        );

        let outcome = registry.call("sync-up", vec![]).await.unwrap();
        assert!(outcome.is_void());
        assert_eq!(
            *log.lock(),
            vec!["before:sync-up", "target", "after:sync-up"]
        );
    }

    #[tokio::test]
    async fn unknown_call_site_returns_error() {
        let mut registry = CallSiteRegistry::default();
        let err = registry.call("nonexistent", vec![]).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownCallSite { name } if name == "nonexistent"
        ));
    }

    #[tokio::test]
    async fn reregistering_replaces_the_previous_site() {
        let mut registry = CallSiteRegistry::default();
        let ty = ReturnType::Value(TypeDesc::of::<i32>());
        registry.register("version", ty, invocable::sync_value(|_args: &[BoxedValue]| Ok(1_i32)));
        registry.register("version", ty, invocable::sync_value(|_args: &[BoxedValue]| Ok(2_i32)));

        let outcome = registry.call("version", vec![]).await.unwrap();
        assert_eq!(outcome.into_value::<i32>(), Some(2));
    }

    #[tokio::test]
    async fn target_failure_passes_through_both_layers() {
        let (mut registry, log) = recording_registry();
        registry.register(
            "load",
            ReturnType::FutureValue(Some(TypeDesc::of::<String>())),
            invocable::async_value(|_args: ArgList| async {
                Err::<String, anyhow::Error>(anyhow::Error::new(BackendUnavailable))
            }),
        );

        let err = registry.call("load", vec![]).await.unwrap_err();
        assert_eq!(err.to_string(), "backend unavailable");
        match err {
            RegistryError::Dispatch(dispatch_err) => {
                let original = dispatch_err.as_target().unwrap();
                assert!(original.downcast_ref::<BackendUnavailable>().is_some());
            }
            RegistryError::UnknownCallSite { .. } => panic!("expected dispatch error"),
        }
        assert_eq!(*log.lock(), vec!["before:load"]);
    }

    #[test]
    fn contains_reflects_registration() {
        let mut registry = CallSiteRegistry::default();
        assert!(!registry.contains("ping"));
        registry.register(
            "ping",
            ReturnType::Void,
            invocable::sync_void(|_args: &[BoxedValue]| Ok(())),
        );
        assert!(registry.contains("ping"));
    }
}
