// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Data table arguments of steps and the types they're transformed with.

pub mod registry;

use std::{any::Any, collections::HashMap, fmt};

use derive_more::with_trait::Debug;

use crate::transformer::{self, TableFn, TypeKey, Value};

pub use self::registry::DataTableTypeRegistry;

/// Raw rows of a step's data table.
///
/// ```rust
/// # use cucumber_types::DataTable;
/// #
/// let table = DataTable::from(vec![
///     vec!["name", "age"],
///     vec!["Alice", "30"],
///     vec!["Bob", "25"],
/// ]);
///
/// assert_eq!(table.rows().len(), 2);
/// assert_eq!(table.hashes()[1]["age"], "25");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataTable {
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Creates a new [`DataTable`] out of the given `rows`.
    #[must_use]
    pub const fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Returns all the rows, header included.
    #[must_use]
    pub fn raw(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the rows following the header row.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Converts the rows into maps keyed by the header row cells.
    #[must_use]
    pub fn hashes(&self) -> Vec<HashMap<String, String>> {
        let Some(header) = self.rows.first() else {
            return Vec::new();
        };
        self.rows()
            .iter()
            .map(|row| header.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }

    /// Converts a two-column table into a map from its first column to its
    /// second one.
    ///
    /// Returns [`None`] if any row doesn't have exactly 2 cells.
    #[must_use]
    pub fn rows_hash(&self) -> Option<HashMap<String, String>> {
        self.rows
            .iter()
            .map(|row| match row.as_slice() {
                [k, v] => Some((k.clone(), v.clone())),
                _ => None,
            })
            .collect()
    }

    /// Returns this table with rows and columns swapped.
    ///
    /// Returns [`None`] if the rows differ in width.
    #[must_use]
    pub fn transpose(&self) -> Option<Self> {
        let width = self.width();
        if self.rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let transposed = (0..width)
            .map(|i| self.rows.iter().map(|row| row[i].clone()).collect())
            .collect();
        Some(Self::new(transposed))
    }

    /// Indicates whether this table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows, header included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of cells in the first row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Consumes this table returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl From<Vec<Vec<String>>> for DataTable {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

impl From<Vec<Vec<&str>>> for DataTable {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(str::to_owned).collect())
                .collect(),
        )
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "| {} |", row.join(" | "))?;
        }
        Ok(())
    }
}

/// Named transformer of [`DataTable`]s into values of a single type.
#[derive(Clone, Debug)]
pub struct DataTableType {
    /// Name this [`DataTableType`] is registered under.
    name: String,

    /// [`TypeKey`] of the produced values.
    type_key: TypeKey,

    /// Erased transformer.
    #[debug(skip)]
    transformer: TableFn,
}

impl DataTableType {
    /// Creates a new [`DataTableType`] named `name` producing `T`s.
    #[must_use]
    pub fn new<T, F>(name: impl Into<String>, transformer: F) -> Self
    where
        T: Any + Send,
        F: Fn(&DataTable) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            type_key: TypeKey::of::<T>(),
            transformer: transformer::table(transformer),
        }
    }

    /// [`DataTableType`] producing the [`DataTable`] itself.
    #[must_use]
    pub fn raw() -> Self {
        Self::new("raw", |t: &DataTable| Ok(t.clone()))
    }

    /// [`DataTableType`] producing the bare rows as `Vec<Vec<String>>`.
    #[must_use]
    pub fn list() -> Self {
        Self::new("list", |t: &DataTable| Ok(t.raw().to_vec()))
    }

    /// Returns the name of this [`DataTableType`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the [`TypeKey`] of the values this [`DataTableType`] produces.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Transforms the given `table`.
    ///
    /// # Errors
    ///
    /// Whatever the transformer fails with, unchanged.
    pub fn transform(&self, table: &DataTable) -> anyhow::Result<Value> {
        (self.transformer)(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> DataTable {
        DataTable::from(vec![
            vec!["name", "age"],
            vec!["Alice", "30"],
            vec!["Bob", "25"],
        ])
    }

    #[test]
    fn rows_skip_header() {
        let table = people();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows(), &[vec!["Alice", "30"], vec!["Bob", "25"]]);
        assert!(DataTable::default().rows().is_empty());
    }

    #[test]
    fn hashes_use_header_as_keys() {
        let hashes = people().hashes();
        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes[0]["name"], "Alice");
        assert_eq!(hashes[1]["age"], "25");
    }

    #[test]
    fn rows_hash_requires_two_columns() {
        let table = DataTable::from(vec![vec!["timeout", "30"], vec!["retries", "3"]]);
        assert_eq!(table.rows_hash().unwrap()["retries"], "3");

        let table = DataTable::from(vec![vec!["a", "b", "c"]]);
        assert!(table.rows_hash().is_none());
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let transposed = people().transpose().unwrap();
        assert_eq!(transposed.raw()[0], vec!["name", "Alice", "Bob"]);
        assert_eq!(transposed.raw()[1], vec!["age", "30", "25"]);
        assert!(DataTable::default().transpose().unwrap().is_empty());
    }

    #[test]
    fn ragged_table_is_not_transposed() {
        let table = DataTable::from(vec![vec!["a", "b"], vec!["c"], vec!["d", "e"]]);
        assert!(table.transpose().is_none());
    }

    #[test]
    fn display_renders_pipes() {
        let table = DataTable::from(vec![vec!["a", "b"], vec!["1", "2"]]);
        assert_eq!(table.to_string(), "| a | b |\n| 1 | 2 |\n");
    }

    #[test]
    fn builtin_table_types() {
        let raw = DataTableType::raw();
        assert_eq!(raw.type_key(), TypeKey::of::<DataTable>());
        let v = raw.transform(&people()).unwrap();
        assert_eq!(v.downcast::<DataTable>().unwrap(), people());

        let list = DataTableType::list();
        assert_eq!(list.name(), "list");
        let v = list.transform(&people()).unwrap();
        assert_eq!(v.downcast::<Vec<Vec<String>>>().unwrap().len(), 3);
    }
}
