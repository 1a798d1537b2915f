//! Result-shape classification: maps a declared return type to exactly one
//! of the four wrapping shapes.

use std::any::{Any, TypeId};
use std::fmt;

// ---------------------------------------------------------------------------
// TypeDesc
// ---------------------------------------------------------------------------

/// Descriptor for a concrete result type.
///
/// Pairs the `TypeId` used for runtime conformance checks with the type
/// name used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    /// Descriptor for the concrete type `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The described type's name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the erased value is of the described type.
    pub(crate) fn matches(&self, value: &(dyn Any + Send)) -> bool {
        value.type_id() == self.id
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ---------------------------------------------------------------------------
// ReturnType
// ---------------------------------------------------------------------------

/// Declared result type of an intercepted call site.
///
/// Supplied by the host alongside the target; the host is responsible for
/// keeping the two consistent. The classifier maps every `ReturnType` to
/// exactly one [`ResultShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// The call site declares no result.
    Void,
    /// The call site declares an immediate value of the described type.
    Value(TypeDesc),
    /// The call site declares an asynchronous computation with no
    /// meaningful resolved value.
    Future,
    /// The call site declares an asynchronous computation resolving to the
    /// described type. `None` when the resolved type cannot be determined;
    /// any resolved value is then accepted.
    FutureValue(Option<TypeDesc>),
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Value(ty) => write!(f, "{ty}"),
            Self::Future => f.write_str("future<()>"),
            Self::FutureValue(Some(ty)) => write!(f, "future<{ty}>"),
            Self::FutureValue(None) => f.write_str("future<_>"),
        }
    }
}

// ---------------------------------------------------------------------------
// ResultShape
// ---------------------------------------------------------------------------

/// The four call-result categories. Exactly one applies to every declared
/// return type, and the shape alone selects the wrapping strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// Synchronous, no result.
    SyncVoid,
    /// Synchronous, immediate value of the described type.
    SyncValue(TypeDesc),
    /// Asynchronous, no meaningful resolved value.
    AsyncVoid,
    /// Asynchronous, resolving to the described type (`None` = any).
    AsyncValue(Option<TypeDesc>),
}

/// Classify a declared return type into its wrapping shape.
///
/// Total and deterministic: every `ReturnType` maps to exactly one shape,
/// and the same input always yields the same shape. Asynchronous cases are
/// matched first, preserving the precedence of the classification rule.
#[must_use]
pub fn classify(declared: ReturnType) -> ResultShape {
    match declared {
        ReturnType::Future => ResultShape::AsyncVoid,
        ReturnType::FutureValue(resolved) => ResultShape::AsyncValue(resolved),
        ReturnType::Void => ResultShape::SyncVoid,
        ReturnType::Value(ty) => ResultShape::SyncValue(ty),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn void_classifies_sync_void() {
        assert_eq!(classify(ReturnType::Void), ResultShape::SyncVoid);
    }

    #[test]
    fn value_classifies_sync_value() {
        let ty = TypeDesc::of::<i32>();
        assert_eq!(classify(ReturnType::Value(ty)), ResultShape::SyncValue(ty));
    }

    #[test]
    fn future_classifies_async_void() {
        assert_eq!(classify(ReturnType::Future), ResultShape::AsyncVoid);
    }

    #[test]
    fn future_value_classifies_async_value() {
        let ty = TypeDesc::of::<String>();
        assert_eq!(
            classify(ReturnType::FutureValue(Some(ty))),
            ResultShape::AsyncValue(Some(ty))
        );
    }

    #[test]
    fn undetermined_future_value_classifies_async_any() {
        assert_eq!(
            classify(ReturnType::FutureValue(None)),
            ResultShape::AsyncValue(None)
        );
    }

    #[test]
    fn type_desc_matches_erased_value() {
        let ty = TypeDesc::of::<i32>();
        let boxed: Box<dyn std::any::Any + Send> = Box::new(42_i32);
        assert!(ty.matches(boxed.as_ref()));
        let other: Box<dyn std::any::Any + Send> = Box::new("hi".to_string());
        assert!(!ty.matches(other.as_ref()));
    }

    fn type_descs() -> impl Strategy<Value = TypeDesc> {
        prop_oneof![
            Just(TypeDesc::of::<i32>()),
            Just(TypeDesc::of::<u64>()),
            Just(TypeDesc::of::<String>()),
            Just(TypeDesc::of::<Vec<u8>>()),
            Just(TypeDesc::of::<()>()),
        ]
    }

    fn return_types() -> impl Strategy<Value = ReturnType> {
        prop_oneof![
            Just(ReturnType::Void),
            Just(ReturnType::Future),
            type_descs().prop_map(ReturnType::Value),
            proptest::option::of(type_descs()).prop_map(ReturnType::FutureValue),
        ]
    }

    proptest! {
        #[test]
        fn classification_is_idempotent(declared in return_types()) {
            prop_assert_eq!(classify(declared), classify(declared));
        }

        #[test]
        fn classification_agrees_with_asyncness(declared in return_types()) {
            let shape = classify(declared);
            match declared {
                ReturnType::Future | ReturnType::FutureValue(_) => prop_assert!(matches!(
                    shape,
                    ResultShape::AsyncVoid | ResultShape::AsyncValue(_)
                )),
                ReturnType::Void | ReturnType::Value(_) => prop_assert!(matches!(
                    shape,
                    ResultShape::SyncVoid | ResultShape::SyncValue(_)
                )),
            }
        }

        #[test]
        fn declared_value_type_is_preserved(ty in type_descs()) {
            prop_assert_eq!(classify(ReturnType::Value(ty)), ResultShape::SyncValue(ty));
            prop_assert_eq!(
                classify(ReturnType::FutureValue(Some(ty))),
                ResultShape::AsyncValue(Some(ty))
            );
        }
    }
}
