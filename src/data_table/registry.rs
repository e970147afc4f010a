// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`DataTableTypeRegistry`] definition.

use std::{any::Any, collections::HashMap, sync::Arc};

use linked_hash_map::LinkedHashMap;

use crate::{
    error::DuplicateTypeNameError,
    transformer::TypeKey,
};

use super::DataTableType;

/// Registry of [`DataTableType`]s, indexed by name and by produced type.
///
/// Several [`DataTableType`]s may produce the same type. Looking up by type
/// resolves to the most recently defined one.
#[derive(Clone, Debug)]
pub struct DataTableTypeRegistry {
    /// [`DataTableType`]s in definition order, keyed by name.
    by_name: LinkedHashMap<String, Arc<DataTableType>>,

    /// [`DataTableType`]s in definition order, keyed by produced type.
    by_type: HashMap<TypeKey, Vec<Arc<DataTableType>>>,
}

impl Default for DataTableTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DataTableTypeRegistry {
    /// Creates a new [`DataTableTypeRegistry`] with the [`DataTableType::raw()`]
    /// and [`DataTableType::list()`] types defined.
    #[must_use]
    pub fn new() -> Self {
        let mut this = Self::empty();
        for builtin in [DataTableType::raw(), DataTableType::list()] {
            this.insert(Arc::new(builtin));
        }
        this
    }

    /// Creates a new [`DataTableTypeRegistry`] without any types defined.
    #[must_use]
    pub fn empty() -> Self {
        Self { by_name: LinkedHashMap::new(), by_type: HashMap::new() }
    }

    /// Defines the given [`DataTableType`].
    ///
    /// # Errors
    ///
    /// With [`DuplicateTypeNameError`] if a [`DataTableType`] with the same
    /// name is defined already.
    pub fn define_data_table_type(
        &mut self,
        table_type: DataTableType,
    ) -> Result<(), DuplicateTypeNameError> {
        if self.by_name.contains_key(table_type.name()) {
            return Err(DuplicateTypeNameError::data_table(table_type.name()));
        }
        if let Some(previous) = self
            .by_type
            .get(&table_type.type_key())
            .and_then(|types| types.last())
        {
            tracing::warn!(
                name = table_type.name(),
                previous = previous.name(),
                ty = %table_type.type_key(),
                "data table type redefines an already registered type",
            );
        }
        tracing::debug!(
            name = table_type.name(),
            ty = %table_type.type_key(),
            "defined data table type",
        );
        self.insert(Arc::new(table_type));
        Ok(())
    }

    /// Returns the [`DataTableType`] registered under the given `name`.
    #[must_use]
    pub fn lookup_table_type_by_name(
        &self,
        name: &str,
    ) -> Option<Arc<DataTableType>> {
        self.by_name.get(name).cloned()
    }

    /// Returns the latest defined [`DataTableType`] producing `T`.
    #[must_use]
    pub fn lookup_table_type_by_type<T: Any>(&self) -> Option<Arc<DataTableType>> {
        self.lookup_table_type_by_type_key(TypeKey::of::<T>())
    }

    /// Returns the latest defined [`DataTableType`] producing the type
    /// identified by `type_key`.
    #[must_use]
    pub fn lookup_table_type_by_type_key(
        &self,
        type_key: TypeKey,
    ) -> Option<Arc<DataTableType>> {
        self.by_type.get(&type_key).and_then(|types| types.last()).cloned()
    }

    /// Returns all the [`DataTableType`]s producing the type identified by
    /// `type_key`, in definition order.
    #[must_use]
    pub fn table_types_by_type_key(
        &self,
        type_key: TypeKey,
    ) -> &[Arc<DataTableType>] {
        self.by_type.get(&type_key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates over all the defined [`DataTableType`]s in definition order.
    pub fn table_types(&self) -> impl Iterator<Item = &Arc<DataTableType>> {
        self.by_name.values()
    }

    /// Adds the given [`DataTableType`] to both indices.
    fn insert(&mut self, table_type: Arc<DataTableType>) {
        self.by_type
            .entry(table_type.type_key())
            .or_default()
            .push(Arc::clone(&table_type));
        drop(self.by_name.insert(table_type.name().to_owned(), table_type));
    }
}
