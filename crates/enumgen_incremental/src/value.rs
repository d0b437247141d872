//! Type-erased stage outputs.

use std::any::Any;
use std::fmt;

use enumgen_common::Traverse;

/// A stage output with its concrete type erased.
///
/// Implemented for every `PartialEq + Debug + Traverse` type, so any stage
/// output can be stored in [`TrackedSteps`](crate::TrackedSteps) and compared
/// across runs.
pub trait TrackedValue: fmt::Debug + Send + Sync {
    /// The value as [`Any`], for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The value as a graph node source.
    fn as_traverse(&self) -> &dyn Traverse;

    /// Value equality; values of different concrete types are never equal.
    fn dyn_eq(&self, other: &dyn TrackedValue) -> bool;
}

impl<T> TrackedValue for T
where
    T: PartialEq + fmt::Debug + Traverse + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_traverse(&self) -> &dyn Traverse {
        self
    }

    fn dyn_eq(&self, other: &dyn TrackedValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

impl PartialEq for dyn TrackedValue {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}
