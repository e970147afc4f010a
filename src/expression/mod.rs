// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Expressions matching step texts and producing [`Argument`]s.

pub mod cucumber;
pub mod group;
pub mod regular;

use std::{fmt, sync::Arc};

use regex::Regex;

use crate::{
    argument::{Argument, ScalarArgument},
    error::Result,
    parameter::{ParameterType, ParameterTypeRegistry},
};

pub use self::{
    cucumber::CucumberExpression,
    group::{Group, GroupBuilder},
    regular::RegularExpression,
};

/// Compiled expression matching step texts.
pub trait Expression: fmt::Debug + Send + Sync {
    /// Matches the whole `text`, producing one [`Argument`] per parameter in
    /// capturing group order.
    ///
    /// Returns [`None`] if the `text` doesn't match.
    fn match_text(&self, text: &str) -> Option<Vec<Argument>>;

    /// Returns the regular expression of this [`Expression`].
    fn regex(&self) -> &Regex;

    /// Returns the source this [`Expression`] was created from.
    fn source(&self) -> &str;
}

impl<E: Expression + ?Sized> Expression for Box<E> {
    fn match_text(&self, text: &str) -> Option<Vec<Argument>> {
        (**self).match_text(text)
    }

    fn regex(&self) -> &Regex {
        (**self).regex()
    }

    fn source(&self) -> &str {
        (**self).source()
    }
}

/// Creates [`Expression`]s out of sources, telling regular expressions from
/// [Cucumber Expressions][1].
///
/// A source is a regular expression if it starts with `^`, ends with `$`, or
/// is wrapped into slashes (`/…/`). Anything else is a
/// [Cucumber Expression][1].
///
/// [1]: https://github.com/cucumber/cucumber-expressions#readme
#[derive(Clone, Copy, Debug)]
pub struct ExpressionFactory<'r> {
    /// Registry the parameters are resolved with.
    registry: &'r ParameterTypeRegistry,
}

impl<'r> ExpressionFactory<'r> {
    /// Creates a new [`ExpressionFactory`] resolving parameters with the given
    /// `registry`.
    #[must_use]
    pub const fn new(registry: &'r ParameterTypeRegistry) -> Self {
        Self { registry }
    }

    /// Creates an [`Expression`] out of the given `source`.
    ///
    /// # Errors
    ///
    /// If the [`CucumberExpression`] or [`RegularExpression`] fails to be
    /// created.
    pub fn create_expression(&self, source: &str) -> Result<Box<dyn Expression>> {
        if let Some(regex) = source
            .strip_prefix('/')
            .and_then(|s| s.strip_suffix('/'))
        {
            return Ok(Box::new(RegularExpression::new(regex, self.registry)?));
        }
        if source.starts_with('^') || source.ends_with('$') {
            return Ok(Box::new(RegularExpression::new(source, self.registry)?));
        }
        Ok(Box::new(CucumberExpression::new(source, self.registry)?))
    }
}

/// Compiled matcher shared by all the [`Expression`]s: an anchored
/// [`Regex`], its capturing groups tree and the [`ParameterType`] of each
/// top-level group.
#[derive(Clone, Debug)]
pub(crate) struct Matcher {
    /// [`Regex`] matching the whole text.
    regex: Regex,

    /// Capturing groups of the [`Regex`].
    tree: GroupBuilder,

    /// [`ParameterType`]s of the top-level capturing groups.
    parameter_types: Vec<Arc<ParameterType>>,
}

impl Matcher {
    /// Creates a new [`Matcher`].
    pub(crate) const fn new(
        regex: Regex,
        tree: GroupBuilder,
        parameter_types: Vec<Arc<ParameterType>>,
    ) -> Self {
        Self { regex, tree, parameter_types }
    }

    /// Returns the [`Regex`] matching the whole text.
    pub(crate) const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the [`ParameterType`]s of the top-level capturing groups.
    pub(crate) fn parameter_types(&self) -> &[Arc<ParameterType>] {
        &self.parameter_types
    }

    /// Matches the given `text`.
    pub(crate) fn match_text(&self, text: &str) -> Option<Vec<Argument>> {
        let captures = self.regex.captures(text)?;
        let root = self.tree.build(&captures);
        Some(
            root.into_children()
                .into_iter()
                .zip(&self.parameter_types)
                .map(|(group, p)| {
                    ScalarArgument::new(Arc::clone(p), group).into()
                })
                .collect(),
        )
    }
}

/// Drops the backslashes escaping characters.
pub(crate) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.extend(chars.next());
        } else {
            out.push(c);
        }
    }
    out
}
