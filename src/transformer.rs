// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shapes of the functions turning raw step payloads into typed values.
//!
//! Every transformer is stored type-erased: it yields a [`Value`] tagged with
//! the [`TypeKey`] of what it produces, so registries can hold transformers of
//! different output types side by side.

use std::{
    any::{self, Any, TypeId},
    hash::{Hash, Hasher},
    sync::Arc,
};

use derive_more::with_trait::{Debug, Display, Error};

use crate::{data_table::DataTable, doc_string::DocString};

/// Opaque identifier of a type produced by a transformer.
///
/// Two [`TypeKey`]s are equal if they identify the same Rust type. The
/// [`Display`] implementation renders the type's name.
#[derive(Clone, Copy, Debug, Display)]
#[display("{name}")]
pub struct TypeKey {
    /// [`TypeId`] used for comparison.
    #[debug(skip)]
    id: TypeId,

    /// Human-readable name used for diagnostics.
    name: &'static str,
}

impl TypeKey {
    /// Returns the [`TypeKey`] of `T`.
    #[must_use]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self { id: TypeId::of::<T>(), name: any::type_name::<T>() }
    }

    /// Returns the name of the identified type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Type-erased result of a transformer.
#[derive(Debug)]
#[debug("Value({type_key})")]
pub struct Value {
    /// [`TypeKey`] of the boxed value.
    type_key: TypeKey,

    /// The value itself.
    inner: Box<dyn Any + Send>,
}

impl Value {
    /// Wraps the given `value`.
    #[must_use]
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self { type_key: TypeKey::of::<T>(), inner: Box::new(value) }
    }

    /// Returns the [`TypeKey`] of the wrapped value.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Checks whether the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Returns a reference to the wrapped value if it's a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Unwraps the value as a `T`.
    ///
    /// # Errors
    ///
    /// Returns this [`Value`] back if it doesn't hold a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_key = self.type_key;
        self.inner
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|inner| Self { type_key, inner })
    }

    /// Unwraps the value as a `T`, converting a mismatch into an error.
    ///
    /// # Errors
    ///
    /// With [`MismatchedTypeError`] if the wrapped value isn't a `T`.
    pub fn try_into_inner<T: Any>(self) -> Result<T, MismatchedTypeError> {
        self.downcast::<T>().map_err(|v| MismatchedTypeError {
            expected: TypeKey::of::<T>(),
            actual: v.type_key,
        })
    }
}

/// Error of retrieving a transformed [`Value`] as a type it doesn't hold.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("Expected argument of type `{expected}`, but it transforms to `{actual}`")]
pub struct MismatchedTypeError {
    /// Requested type.
    pub expected: TypeKey,

    /// Type the transformer actually produces.
    pub actual: TypeKey,
}

/// Erased transformer of capture group values.
pub(crate) type CaptureGroupFn =
    Arc<dyn Fn(&[Option<&str>]) -> anyhow::Result<Value> + Send + Sync>;

/// Erased transformer of [`DataTable`]s.
pub(crate) type TableFn =
    Arc<dyn Fn(&DataTable) -> anyhow::Result<Value> + Send + Sync>;

/// Erased transformer of [`DocString`]s.
pub(crate) type DocStringFn =
    Arc<dyn Fn(&DocString) -> anyhow::Result<Value> + Send + Sync>;

/// Erases a transformer accepting a single string: only the first capture
/// group value is passed on.
pub(crate) fn single<T, F>(f: F) -> CaptureGroupFn
where
    T: Any + Send,
    F: Fn(Option<&str>) -> anyhow::Result<T> + Send + Sync + 'static,
{
    Arc::new(move |groups: &[Option<&str>]| {
        f(groups.first().copied().flatten()).map(Value::new)
    })
}

/// Erases a transformer accepting all the capture group values.
pub(crate) fn capture_groups<T, F>(f: F) -> CaptureGroupFn
where
    T: Any + Send,
    F: Fn(&[Option<&str>]) -> anyhow::Result<T> + Send + Sync + 'static,
{
    Arc::new(move |groups: &[Option<&str>]| f(groups).map(Value::new))
}

/// Erases a [`DataTable`] transformer.
pub(crate) fn table<T, F>(f: F) -> TableFn
where
    T: Any + Send,
    F: Fn(&DataTable) -> anyhow::Result<T> + Send + Sync + 'static,
{
    Arc::new(move |t: &DataTable| f(t).map(Value::new))
}

/// Erases a [`DocString`] transformer.
pub(crate) fn doc_string<T, F>(f: F) -> DocStringFn
where
    T: Any + Send,
    F: Fn(&DocString) -> anyhow::Result<T> + Send + Sync + 'static,
{
    Arc::new(move |d: &DocString| f(d).map(Value::new))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_key_compares_by_type() {
        assert_eq!(TypeKey::of::<i32>(), TypeKey::of::<i32>());
        assert_ne!(TypeKey::of::<i32>(), TypeKey::of::<i64>());
        assert_eq!(TypeKey::of::<String>().to_string(), "alloc::string::String");
    }

    #[test]
    fn value_downcasts_to_its_type_only() {
        let v = Value::new(42_u8);
        assert!(v.is::<u8>());
        assert_eq!(v.downcast_ref::<u8>(), Some(&42));

        let v = v.downcast::<String>().unwrap_err();
        assert_eq!(v.type_key(), TypeKey::of::<u8>());
        assert_eq!(v.downcast::<u8>().unwrap(), 42);
    }

    #[test]
    fn mismatch_reports_both_types() {
        let err = Value::new(1.5_f64).try_into_inner::<i32>().unwrap_err();
        assert_eq!(err.expected, TypeKey::of::<i32>());
        assert_eq!(err.actual, TypeKey::of::<f64>());
        assert_eq!(
            err.to_string(),
            "Expected argument of type `i32`, but it transforms to `f64`",
        );
    }

    #[test]
    fn single_passes_first_group() {
        let f = single(|s: Option<&str>| Ok(s.map(str::len)));
        let v = f(&[Some("abc"), Some("de")]).unwrap();
        assert_eq!(v.downcast::<Option<usize>>().unwrap(), Some(3));

        let v = f(&[]).unwrap();
        assert_eq!(v.downcast::<Option<usize>>().unwrap(), None);
    }
}
