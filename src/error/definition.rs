// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of defining types and compiling expressions.

use derive_more::with_trait::{Display, Error};

/// Error of defining a type under a name that is already taken.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("There is already a {kind} type with name {name}")]
pub struct DuplicateTypeNameError {
    /// Kind of the registry rejecting the definition.
    #[error(not(source))]
    pub kind: &'static str,

    /// Name that is already taken.
    #[error(not(source))]
    pub name: String,
}

impl DuplicateTypeNameError {
    /// Creates a new [`DuplicateTypeNameError`] of a parameter type.
    #[must_use]
    pub fn parameter(name: impl Into<String>) -> Self {
        Self { kind: "parameter", name: name.into() }
    }

    /// Creates a new [`DuplicateTypeNameError`] of a data table type.
    #[must_use]
    pub fn data_table(name: impl Into<String>) -> Self {
        Self { kind: "data table", name: name.into() }
    }
}

/// Errors of [Cucumber Expressions][1] and the parameter types they rely on.
///
/// [1]: https://github.com/cucumber/cucumber-expressions#readme
#[derive(Clone, Debug, Display, Error)]
pub enum CucumberExpressionError {
    /// Two preferential parameter types share a regular expression.
    #[display(
        "There can only be one preferential parameter type per regexp. \
         The regexp /{regexp}/ is used for two preferential parameter types, \
         {{{existing}}} and {{{defined}}}"
    )]
    DuplicatePreferential {
        /// Shared regular expression.
        #[error(not(source))]
        regexp: String,

        /// Name of the already defined preferential parameter type.
        #[error(not(source))]
        existing: String,

        /// Name of the rejected parameter type.
        #[error(not(source))]
        defined: String,
    },

    /// Parameter type name contains a reserved character.
    #[display(
        "Illegal character in parameter name {{{name}}}. Parameter names may \
         not contain '{{', '}}', '(', ')', '\\' or '/'"
    )]
    IllegalParameterName {
        /// Rejected name.
        #[error(not(source))]
        name: String,
    },

    /// Expression couldn't be parsed.
    #[display("Invalid Cucumber Expression `{expression}`: {reason}")]
    Malformed {
        /// Source of the expression.
        #[error(not(source))]
        expression: String,

        /// Description of what's wrong with it.
        #[error(not(source))]
        reason: String,
    },

    /// Expression expanded into a regular expression that doesn't compile.
    #[display("Expression `{expression}` is not a valid regular expression: {error}")]
    Regex {
        /// Source of the expression.
        #[error(not(source))]
        expression: String,

        /// Compilation error.
        #[error(source)]
        error: regex::Error,
    },
}

impl CucumberExpressionError {
    /// Creates a new [`CucumberExpressionError::DuplicatePreferential`].
    #[must_use]
    pub fn duplicate_preferential(
        regexp: impl Into<String>,
        existing: impl Into<String>,
        defined: impl Into<String>,
    ) -> Self {
        Self::DuplicatePreferential {
            regexp: regexp.into(),
            existing: existing.into(),
            defined: defined.into(),
        }
    }

    /// Creates a new [`CucumberExpressionError::IllegalParameterName`].
    #[must_use]
    pub fn illegal_parameter_name(name: impl Into<String>) -> Self {
        Self::IllegalParameterName { name: name.into() }
    }

    /// Creates a new [`CucumberExpressionError::Malformed`].
    #[must_use]
    pub fn malformed(
        expression: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Malformed {
            expression: expression.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a new [`CucumberExpressionError::Regex`].
    #[must_use]
    pub fn regex(expression: impl Into<String>, error: regex::Error) -> Self {
        Self::Regex { expression: expression.into(), error }
    }

    /// Returns true if this is a duplicated preferential regexp error.
    #[must_use]
    pub const fn is_duplicate_preferential(&self) -> bool {
        matches!(self, Self::DuplicatePreferential { .. })
    }

    /// Returns true if this is a malformed expression error.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Regex { .. })
    }
}

/// Error of an expression referencing a parameter type that isn't defined.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display(
    "Undefined parameter type {{{name}}}. Please register a ParameterType \
     for {{{name}}}."
)]
pub struct UndefinedParameterTypeError {
    /// Name of the missing parameter type.
    #[error(not(source))]
    pub name: String,

    /// Source of the expression referencing it.
    #[error(not(source))]
    pub expression: String,
}
