// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`StepExpression`] definition.

use std::sync::Arc;

use regex::Regex;

use crate::{
    argument::{Argument, DataTableArgument, DocStringArgument},
    data_table::{DataTable, DataTableType},
    doc_string::{DocString, DocStringType},
    expression::Expression,
};

/// [`Expression`] of a step, matching its text along with the data table or
/// doc string attached to it.
///
/// Arguments captured from the text come first, in capturing group order.
/// The data table or doc string argument, if any, always comes last.
#[derive(Clone, Debug)]
pub struct StepExpression {
    /// [`Expression`] matching the step text.
    expression: Arc<dyn Expression>,

    /// [`DataTableType`] of the attached data tables.
    table_type: Arc<DataTableType>,

    /// [`DocStringType`] of the attached doc strings.
    doc_string_type: Arc<DocStringType>,
}

impl StepExpression {
    /// Creates a new [`StepExpression`] passing data tables on as
    /// [`DataTable`]s and doc strings as [`DocString`]s.
    #[must_use]
    pub fn new(expression: impl Expression + 'static) -> Self {
        Self {
            expression: Arc::new(expression),
            table_type: Arc::new(DataTableType::raw()),
            doc_string_type: Arc::new(DocStringType::default()),
        }
    }

    /// Sets the [`DataTableType`] attached data tables are transformed with.
    #[must_use]
    pub fn with_table_type(mut self, table_type: Arc<DataTableType>) -> Self {
        self.table_type = table_type;
        self
    }

    /// Sets the [`DocStringType`] attached doc strings are transformed with.
    #[must_use]
    pub fn with_doc_string_type(
        mut self,
        doc_string_type: Arc<DocStringType>,
    ) -> Self {
        self.doc_string_type = doc_string_type;
        self
    }

    /// Returns the [`DataTableType`] of the attached data tables.
    #[must_use]
    pub const fn table_type(&self) -> &Arc<DataTableType> {
        &self.table_type
    }

    /// Returns the [`DocStringType`] of the attached doc strings.
    #[must_use]
    pub const fn doc_string_type(&self) -> &Arc<DocStringType> {
        &self.doc_string_type
    }

    /// Matches the step `text` having the given data `table` attached.
    ///
    /// On a match, a [`DataTableArgument`] follows the arguments captured
    /// from the `text`.
    #[must_use]
    pub fn match_with_table(
        &self,
        text: &str,
        table: impl Into<DataTable>,
    ) -> Option<Vec<Argument>> {
        let mut arguments = self.expression.match_text(text)?;
        arguments.push(
            DataTableArgument::new(Arc::clone(&self.table_type), table.into())
                .into(),
        );
        Some(arguments)
    }

    /// Matches the step `text` having the given `doc_string` attached.
    ///
    /// On a match, a [`DocStringArgument`] follows the arguments captured
    /// from the `text`.
    #[must_use]
    pub fn match_with_doc_string(
        &self,
        text: &str,
        doc_string: impl Into<DocString>,
    ) -> Option<Vec<Argument>> {
        let mut arguments = self.expression.match_text(text)?;
        arguments.push(
            DocStringArgument::new(
                Arc::clone(&self.doc_string_type),
                doc_string.into(),
            )
            .into(),
        );
        Some(arguments)
    }
}

impl Expression for StepExpression {
    fn match_text(&self, text: &str) -> Option<Vec<Argument>> {
        self.expression.match_text(text)
    }

    fn regex(&self) -> &Regex {
        self.expression.regex()
    }

    fn source(&self) -> &str {
        self.expression.source()
    }
}
