// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`TypeRegistry`] definition.

use std::{any::Any, sync::Arc};

use crate::{
    data_table::{DataTableType, DataTableTypeRegistry},
    error::{AmbiguousTypeError, Result},
    expression::ExpressionFactory,
    locale::Locale,
    parameter::{ParameterType, ParameterTypeRegistry},
    step_expression::StepExpression,
};

/// Parameter types and data table types of a test suite.
///
/// ```rust
/// # use cucumber_types::{Expression as _, Locale, ParameterType, TypeRegistry};
/// #
/// #[derive(Debug, PartialEq)]
/// struct Color(String);
///
/// let mut registry = TypeRegistry::new(Locale::new("en"));
/// registry
///     .define_parameter_type(ParameterType::new(
///         "color",
///         "red|blue|yellow",
///         |s: Option<&str>| Ok(Color(s.unwrap_or_default().to_owned())),
///     ))
///     .unwrap();
///
/// let step = registry.step_expression("I have a {color} ball").unwrap();
/// let args = step.match_text("I have a red ball").unwrap();
/// assert_eq!(args[0].transform_into::<Color>().unwrap(), Color("red".into()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    /// Registry of [`ParameterType`]s.
    parameter_types: ParameterTypeRegistry,

    /// Registry of [`DataTableType`]s.
    table_types: DataTableTypeRegistry,
}

impl TypeRegistry {
    /// Creates a new [`TypeRegistry`] with the built-in types defined, the
    /// numeric ones following the given [`Locale`].
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            parameter_types: ParameterTypeRegistry::new(locale),
            table_types: DataTableTypeRegistry::new(),
        }
    }

    /// Returns the [`ParameterTypeRegistry`].
    #[must_use]
    pub const fn parameter_type_registry(&self) -> &ParameterTypeRegistry {
        &self.parameter_types
    }

    /// Returns the [`DataTableTypeRegistry`].
    #[must_use]
    pub const fn data_table_type_registry(&self) -> &DataTableTypeRegistry {
        &self.table_types
    }

    /// Defines the given [`ParameterType`].
    ///
    /// # Errors
    ///
    /// See [`ParameterTypeRegistry::define_parameter_type()`].
    pub fn define_parameter_type(
        &mut self,
        parameter_type: ParameterType,
    ) -> Result<()> {
        self.parameter_types.define_parameter_type(parameter_type)
    }

    /// Defines the given [`DataTableType`].
    ///
    /// # Errors
    ///
    /// See [`DataTableTypeRegistry::define_data_table_type()`].
    pub fn define_data_table_type(
        &mut self,
        table_type: DataTableType,
    ) -> Result<()> {
        Ok(self.table_types.define_data_table_type(table_type)?)
    }

    /// Returns the [`ParameterType`] registered under the given `name`.
    #[must_use]
    pub fn lookup_parameter_type_by_name(
        &self,
        name: &str,
    ) -> Option<Arc<ParameterType>> {
        self.parameter_types.lookup_by_name(name)
    }

    /// Returns the only [`ParameterType`] producing `T`.
    ///
    /// # Errors
    ///
    /// With [`AmbiguousTypeError`] if several [`ParameterType`]s produce `T`.
    pub fn lookup_parameter_type_by_type<T: Any>(
        &self,
    ) -> std::result::Result<Option<Arc<ParameterType>>, AmbiguousTypeError>
    {
        self.parameter_types.lookup_by_type::<T>()
    }

    /// Returns the only [`ParameterType`] producing a type with the given
    /// name.
    ///
    /// # Errors
    ///
    /// With [`AmbiguousTypeError`] if several [`ParameterType`]s produce it.
    pub fn lookup_parameter_type_by_type_name(
        &self,
        type_name: &str,
    ) -> std::result::Result<Option<Arc<ParameterType>>, AmbiguousTypeError>
    {
        self.parameter_types.lookup_by_type_name(type_name)
    }

    /// Returns the [`DataTableType`] registered under the given `name`.
    #[must_use]
    pub fn lookup_table_type_by_name(
        &self,
        name: &str,
    ) -> Option<Arc<DataTableType>> {
        self.table_types.lookup_table_type_by_name(name)
    }

    /// Returns the latest defined [`DataTableType`] producing `T`.
    #[must_use]
    pub fn lookup_table_type_by_type<T: Any>(
        &self,
    ) -> Option<Arc<DataTableType>> {
        self.table_types.lookup_table_type_by_type::<T>()
    }

    /// Creates a [`StepExpression`] out of the given `source`, telling
    /// regular expressions from [Cucumber Expressions][1] the way
    /// [`ExpressionFactory`] does.
    ///
    /// # Errors
    ///
    /// If the expression fails to be created.
    ///
    /// [1]: https://github.com/cucumber/cucumber-expressions#readme
    pub fn step_expression(&self, source: &str) -> Result<StepExpression> {
        let expression = ExpressionFactory::new(&self.parameter_types)
            .create_expression(source)?;
        Ok(StepExpression::new(expression))
    }
}
