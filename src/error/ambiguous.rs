// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of lookups resolving to several parameter types.
//!
//! Their messages are deterministic: candidates are always rendered sorted by
//! name, suggestions in the order they were given.

use std::{fmt, sync::Arc};

use derive_more::with_trait::Error;
use itertools::Itertools as _;

use crate::{parameter::ParameterType, transformer::TypeKey};

/// Closing part shared by the ambiguity messages.
const UNDECIDED: &str =
    "I couldn't decide which one to use. You have two options:";

/// Error of looking up a parameter type by a type produced by several of
/// them.
#[derive(Clone, Debug, Error)]
pub struct AmbiguousTypeError {
    /// Type that has been looked up.
    #[error(not(source))]
    pub type_key: TypeKey,

    /// Parameter types producing it, sorted by name.
    #[error(not(source))]
    pub candidates: Vec<Arc<ParameterType>>,
}

impl AmbiguousTypeError {
    /// Creates a new [`AmbiguousTypeError`], sorting the `candidates`.
    #[must_use]
    pub fn new(
        type_key: TypeKey,
        candidates: impl IntoIterator<Item = Arc<ParameterType>>,
    ) -> Self {
        Self { type_key, candidates: sorted_by_name(candidates) }
    }
}

impl fmt::Display for AmbiguousTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "There are multiple parameter types for {}:", self.type_key)?;
        write_names(f, &self.candidates)?;
        write!(
            f,
            "\n{UNDECIDED}\n\n\
             1) Use a single parameter type instead of multiple and combine \
             their regular expressions.\n\n\
             2) Create a wrapper for {} to make the difference explicit.\n",
            self.type_key,
        )
    }
}

/// Error of looking up a parameter type by a regular expression fragment
/// shared by several of them, none being preferential.
#[derive(Clone, Debug, Error)]
pub struct AmbiguousRegularExpressionError {
    /// Whole regular expression the fragment was taken from.
    #[error(not(source))]
    pub regex: String,

    /// Fragment that has been looked up.
    #[error(not(source))]
    pub fragment: String,

    /// Parameter types sharing the fragment, sorted by name.
    #[error(not(source))]
    pub candidates: Vec<Arc<ParameterType>>,

    /// Cucumber Expressions that could replace the regular expression.
    #[error(not(source))]
    pub suggestions: Vec<String>,
}

impl AmbiguousRegularExpressionError {
    /// Creates a new [`AmbiguousRegularExpressionError`], sorting the
    /// `candidates`.
    #[must_use]
    pub fn new(
        regex: impl Into<String>,
        fragment: impl Into<String>,
        candidates: impl IntoIterator<Item = Arc<ParameterType>>,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            regex: regex.into(),
            fragment: fragment.into(),
            candidates: sorted_by_name(candidates),
            suggestions,
        }
    }
}

impl fmt::Display for AmbiguousRegularExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Regular Expression /{}/", self.regex)?;
        writeln!(
            f,
            "matches multiple parameter types with regexp /{}/:",
            self.fragment,
        )?;
        write_names(f, &self.candidates)?;
        write!(
            f,
            "\n{UNDECIDED}\n\n\
             1) Use a Cucumber Expression instead of a Regular Expression. \
             Try one of these:\n",
        )?;
        for suggestion in &self.suggestions {
            writeln!(f, "   {suggestion}")?;
        }
        write!(
            f,
            "\n2) Make one of the parameter types preferential and continue \
             to use a Regular Expression.\n\n",
        )
    }
}

/// Sorts the given parameter types by their names.
fn sorted_by_name(
    types: impl IntoIterator<Item = Arc<ParameterType>>,
) -> Vec<Arc<ParameterType>> {
    types.into_iter().sorted_by(|a, b| a.name().cmp(b.name())).collect()
}

/// Writes an indented `{name}` line per parameter type.
fn write_names(
    f: &mut fmt::Formatter<'_>,
    types: &[Arc<ParameterType>],
) -> fmt::Result {
    types.iter().try_for_each(|p| writeln!(f, "   {{{}}}", p.name()))
}
