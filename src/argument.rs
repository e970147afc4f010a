// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Argument`]s produced by matching a step.
//!
//! Every argument keeps its raw payload next to the type it's transformed
//! with. Nothing is transformed until asked for.

use std::{any::Any, sync::Arc};

use derive_more::with_trait::From;

use crate::{
    data_table::{DataTable, DataTableType},
    doc_string::{DocString, DocStringType},
    expression::Group,
    parameter::ParameterType,
    transformer::{TypeKey, Value},
};

/// Argument of a matched step.
#[derive(Clone, Debug, From)]
pub enum Argument {
    /// Value captured from the step text.
    Scalar(ScalarArgument),

    /// Data table attached to the step.
    DataTable(DataTableArgument),

    /// Doc string attached to the step.
    DocString(DocStringArgument),
}

impl Argument {
    /// Transforms the raw payload of this [`Argument`].
    ///
    /// # Errors
    ///
    /// Whatever the transformer fails with, unchanged.
    pub fn transform(&self) -> anyhow::Result<Value> {
        match self {
            Self::Scalar(arg) => arg.transform(),
            Self::DataTable(arg) => arg.transform(),
            Self::DocString(arg) => arg.transform(),
        }
    }

    /// Transforms the raw payload of this [`Argument`] into a `T`.
    ///
    /// # Errors
    ///
    /// - Whatever the transformer fails with, unchanged.
    /// - [`MismatchedTypeError`] if the transformer doesn't produce a `T`.
    ///
    /// [`MismatchedTypeError`]: crate::transformer::MismatchedTypeError
    pub fn transform_into<T: Any>(&self) -> anyhow::Result<T> {
        Ok(self.transform()?.try_into_inner::<T>()?)
    }

    /// Returns the [`TypeKey`] of the value this [`Argument`] transforms
    /// into.
    #[must_use]
    pub fn type_key(&self) -> TypeKey {
        match self {
            Self::Scalar(arg) => arg.parameter_type.type_key(),
            Self::DataTable(arg) => arg.table_type.type_key(),
            Self::DocString(arg) => arg.doc_string_type.type_key(),
        }
    }

    /// Returns the [`ScalarArgument`], if this is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&ScalarArgument> {
        if let Self::Scalar(arg) = self { Some(arg) } else { None }
    }

    /// Returns the [`DataTableArgument`], if this is one.
    #[must_use]
    pub const fn as_data_table(&self) -> Option<&DataTableArgument> {
        if let Self::DataTable(arg) = self { Some(arg) } else { None }
    }

    /// Returns the [`DocStringArgument`], if this is one.
    #[must_use]
    pub const fn as_doc_string(&self) -> Option<&DocStringArgument> {
        if let Self::DocString(arg) = self { Some(arg) } else { None }
    }
}

/// Capturing group value along with its [`ParameterType`].
#[derive(Clone, Debug)]
pub struct ScalarArgument {
    /// [`ParameterType`] the [`Group`] is transformed with.
    parameter_type: Arc<ParameterType>,

    /// Captured [`Group`].
    group: Group,
}

impl ScalarArgument {
    /// Creates a new [`ScalarArgument`].
    #[must_use]
    pub const fn new(parameter_type: Arc<ParameterType>, group: Group) -> Self {
        Self { parameter_type, group }
    }

    /// Returns the [`ParameterType`] of this [`ScalarArgument`].
    #[must_use]
    pub const fn parameter_type(&self) -> &Arc<ParameterType> {
        &self.parameter_type
    }

    /// Returns the captured [`Group`].
    #[must_use]
    pub const fn group(&self) -> &Group {
        &self.group
    }

    /// Returns the captured text, if the group participated in the match.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.group.value()
    }

    /// Transforms the captured values.
    ///
    /// # Errors
    ///
    /// Whatever the transformer fails with, unchanged.
    pub fn transform(&self) -> anyhow::Result<Value> {
        self.parameter_type.transform(&self.group.values())
    }
}

/// [`DataTable`] along with its [`DataTableType`].
#[derive(Clone, Debug)]
pub struct DataTableArgument {
    /// [`DataTableType`] the [`DataTable`] is transformed with.
    table_type: Arc<DataTableType>,

    /// Raw table.
    table: DataTable,
}

impl DataTableArgument {
    /// Creates a new [`DataTableArgument`].
    #[must_use]
    pub const fn new(table_type: Arc<DataTableType>, table: DataTable) -> Self {
        Self { table_type, table }
    }

    /// Returns the [`DataTableType`] of this [`DataTableArgument`].
    #[must_use]
    pub const fn table_type(&self) -> &Arc<DataTableType> {
        &self.table_type
    }

    /// Returns the raw [`DataTable`].
    #[must_use]
    pub const fn table(&self) -> &DataTable {
        &self.table
    }

    /// Transforms the [`DataTable`].
    ///
    /// # Errors
    ///
    /// Whatever the transformer fails with, unchanged.
    pub fn transform(&self) -> anyhow::Result<Value> {
        self.table_type.transform(&self.table)
    }
}

/// [`DocString`] along with its [`DocStringType`].
#[derive(Clone, Debug)]
pub struct DocStringArgument {
    /// [`DocStringType`] the [`DocString`] is transformed with.
    doc_string_type: Arc<DocStringType>,

    /// Raw doc string.
    doc_string: DocString,
}

impl DocStringArgument {
    /// Creates a new [`DocStringArgument`].
    #[must_use]
    pub const fn new(
        doc_string_type: Arc<DocStringType>,
        doc_string: DocString,
    ) -> Self {
        Self { doc_string_type, doc_string }
    }

    /// Returns the [`DocStringType`] of this [`DocStringArgument`].
    #[must_use]
    pub const fn doc_string_type(&self) -> &Arc<DocStringType> {
        &self.doc_string_type
    }

    /// Returns the raw [`DocString`].
    #[must_use]
    pub const fn doc_string(&self) -> &DocString {
        &self.doc_string
    }

    /// Transforms the [`DocString`].
    ///
    /// # Errors
    ///
    /// Whatever the transformer fails with, unchanged.
    pub fn transform(&self) -> anyhow::Result<Value> {
        self.doc_string_type.transform(&self.doc_string)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::transformer::MismatchedTypeError;

    use super::*;

    fn scalar(value: &str) -> Argument {
        let p = ParameterType::new("n", r"\d+", |s: Option<&str>| {
            Ok(s.unwrap_or_default().parse::<u16>()?)
        });
        ScalarArgument::new(
            Arc::new(p),
            Group::new(Some(value.to_owned()), Some((0, value.len()))),
        )
        .into()
    }

    #[test]
    fn scalar_transforms_on_demand() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let p = ParameterType::new("n", r"\d+", move |s: Option<&str>| {
            _ = counter.fetch_add(1, Ordering::SeqCst);
            Ok(s.map(str::len))
        });
        let arg = Argument::from(ScalarArgument::new(
            Arc::new(p),
            Group::new(Some("123".into()), Some((0, 3))),
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(arg.transform_into::<Option<usize>>().unwrap(), Some(3));
        assert_eq!(arg.transform_into::<Option<usize>>().unwrap(), Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(arg.as_scalar().and_then(ScalarArgument::value), Some("123"));
    }

    #[test]
    fn wrong_type_is_reported() {
        let err = scalar("12").transform_into::<i64>().unwrap_err();
        let err = err.downcast::<MismatchedTypeError>().unwrap();
        assert_eq!(err.actual, TypeKey::of::<u16>());
        assert_eq!(err.expected, TypeKey::of::<i64>());
    }

    #[test]
    fn transformer_error_is_not_wrapped() {
        let err = scalar("70000").transform().unwrap_err();
        assert!(err.downcast_ref::<std::num::ParseIntError>().is_some());
    }

    #[test]
    fn table_and_doc_string_keep_payloads() {
        let table = Argument::from(DataTableArgument::new(
            Arc::new(DataTableType::list()),
            DataTable::from(vec![vec!["a", "b"]]),
        ));
        assert_eq!(table.type_key(), TypeKey::of::<Vec<Vec<String>>>());
        assert_eq!(
            table.transform_into::<Vec<Vec<String>>>().unwrap(),
            [["a", "b"]],
        );
        assert!(table.as_data_table().is_some());

        let doc = Argument::from(DocStringArgument::new(
            Arc::new(DocStringType::default()),
            DocString::new("text"),
        ));
        assert_eq!(
            doc.as_doc_string().map(|d| d.doc_string().content.as_str()),
            Some("text"),
        );
        assert_eq!(doc.transform_into::<DocString>().unwrap().content, "text");
    }
}
