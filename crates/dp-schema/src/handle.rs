//! Schema handle capability and deep copy.

use std::fmt;
use std::sync::Arc;

/// A schema type the registry can store and hand out.
///
/// Equality is structural. [`SchemaHandle::deep_copy`] must return a value
/// that compares equal to `self` but shares no mutable storage with it. For
/// owned data `clone` already does that; shared-pointer handles override it.
pub trait SchemaHandle: Clone + PartialEq + fmt::Debug {
    #[must_use]
    fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Whether this value stands for "no schema" (for example JSON `null`).
    /// Absent handles are never stored or handed out by the registry.
    #[must_use]
    fn is_absent(&self) -> bool {
        false
    }
}

impl SchemaHandle for serde_json::Value {
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl<T> SchemaHandle for Arc<T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    fn deep_copy(&self) -> Self {
        Self::new((**self).clone())
    }
}

/// Independent copy of `schema`. Mutating the copy never affects the original.
#[must_use]
pub fn create_copy<S: SchemaHandle>(schema: &S) -> S {
    schema.deep_copy()
}
