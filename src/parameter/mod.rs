// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`ParameterType`] definition.

pub(crate) mod builtin;
pub mod registry;

use std::{any::Any, error::Error as StdError, str::FromStr};

use derive_more::with_trait::Debug;

use crate::transformer::{self, CaptureGroupFn, TypeKey, Value};

pub use self::registry::ParameterTypeRegistry;

/// Type usable as a custom [Cucumber Expressions][1] parameter.
///
/// [1]: https://github.com/cucumber/cucumber-expressions#readme
pub trait Parameter {
    /// [`Regex`] fragment matching this parameter.
    ///
    /// [`Regex`]: regex::Regex
    const REGEX: &'static str;

    /// Name which this [`Parameter`] is referenced by.
    const NAME: &'static str;
}

/// Named mapping of one or more regular expression fragments to values of a
/// single type.
#[derive(Clone, Debug)]
pub struct ParameterType {
    /// Name of this [`ParameterType`], referenced as `{name}`.
    name: String,

    /// Regular expression fragments matching this [`ParameterType`].
    regexps: Vec<String>,

    /// [`TypeKey`] of the produced values.
    type_key: TypeKey,

    /// Erased transformer of the capture group values.
    #[debug(skip)]
    transformer: CaptureGroupFn,

    /// Whether this [`ParameterType`] takes part in resolving capture groups
    /// of regular expressions.
    use_for_regex_match: bool,

    /// Whether this [`ParameterType`] may be suggested in generated
    /// expressions.
    use_for_snippets: bool,

    /// Whether this [`ParameterType`] wins over others sharing a regular
    /// expression.
    preferential: bool,

    /// Whether this is the built-in `{}` parameter type.
    anonymous: bool,
}

impl ParameterType {
    /// Creates a new [`ParameterType`] matching a single `regexp` and
    /// transforming the matched text with the given `transformer`.
    ///
    /// The `transformer` receives [`None`] if the capture group didn't
    /// participate in the match.
    #[must_use]
    pub fn new<T, F>(
        name: impl Into<String>,
        regexp: impl Into<String>,
        transformer: F,
    ) -> Self
    where
        T: Any + Send,
        F: Fn(Option<&str>) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self::erased(
            name.into(),
            vec![regexp.into()],
            TypeKey::of::<T>(),
            transformer::single(transformer),
        )
    }

    /// Creates a new [`ParameterType`] matching any of the given `regexps`
    /// and transforming the values of their capture groups with the given
    /// `transformer`.
    ///
    /// If the matched fragment has capture groups of its own, the
    /// `transformer` receives their values, otherwise the whole matched text.
    #[must_use]
    pub fn with_regexps<T, F, R>(
        name: impl Into<String>,
        regexps: R,
        transformer: F,
    ) -> Self
    where
        T: Any + Send,
        F: Fn(&[Option<&str>]) -> anyhow::Result<T> + Send + Sync + 'static,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self::erased(
            name.into(),
            regexps.into_iter().map(Into::into).collect(),
            TypeKey::of::<T>(),
            transformer::capture_groups(transformer),
        )
    }

    /// Creates a new [`ParameterType`] out of a [`Parameter`] parsed with its
    /// [`FromStr`] implementation.
    #[must_use]
    pub fn from_parameter<P>() -> Self
    where
        P: Parameter + FromStr + Any + Send,
        P::Err: StdError + Send + Sync + 'static,
    {
        Self::new(P::NAME, P::REGEX, |s: Option<&str>| {
            Ok(s.unwrap_or_default().parse::<P>()?)
        })
    }

    /// Builds a [`ParameterType`] out of an already erased transformer.
    pub(crate) fn erased(
        name: String,
        regexps: Vec<String>,
        type_key: TypeKey,
        transformer: CaptureGroupFn,
    ) -> Self {
        Self {
            name,
            regexps,
            type_key,
            transformer,
            use_for_regex_match: true,
            use_for_snippets: true,
            preferential: false,
            anonymous: false,
        }
    }

    /// Sets whether this [`ParameterType`] wins over others sharing a
    /// regular expression. Defaults to `false`.
    #[must_use]
    pub const fn preferential(mut self, preferential: bool) -> Self {
        self.preferential = preferential;
        self
    }

    /// Sets whether this [`ParameterType`] takes part in resolving capture
    /// groups of regular expressions. Defaults to `true`.
    #[must_use]
    pub const fn use_for_regex_match(mut self, enabled: bool) -> Self {
        self.use_for_regex_match = enabled;
        self
    }

    /// Sets whether this [`ParameterType`] may be suggested in generated
    /// expressions. Defaults to `true`.
    #[must_use]
    pub const fn use_for_snippets(mut self, enabled: bool) -> Self {
        self.use_for_snippets = enabled;
        self
    }

    /// Marks this [`ParameterType`] as the built-in `{}` one.
    pub(crate) const fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// Returns the name of this [`ParameterType`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the regular expression fragments of this [`ParameterType`].
    #[must_use]
    pub fn regexps(&self) -> &[String] {
        &self.regexps
    }

    /// Returns the [`TypeKey`] of the values this [`ParameterType`] produces.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Indicates whether this [`ParameterType`] wins over others sharing a
    /// regular expression.
    #[must_use]
    pub const fn is_preferential(&self) -> bool {
        self.preferential
    }

    /// Indicates whether this [`ParameterType`] takes part in resolving
    /// capture groups of regular expressions.
    #[must_use]
    pub const fn is_used_for_regex_match(&self) -> bool {
        self.use_for_regex_match
    }

    /// Indicates whether this [`ParameterType`] may be suggested in generated
    /// expressions.
    #[must_use]
    pub const fn is_used_for_snippets(&self) -> bool {
        self.use_for_snippets
    }

    /// Indicates whether this is the built-in `{}` parameter type.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Returns the regular expression capturing this [`ParameterType`] as a
    /// single group: `(regexp)` or `((?:regexp1)|(?:regexp2))`.
    #[must_use]
    pub fn capture_regex(&self) -> String {
        match self.regexps.as_slice() {
            [single] => format!("({single})"),
            many => format!("((?:{}))", many.join(")|(?:")),
        }
    }

    /// Transforms the given capture group values.
    ///
    /// # Errors
    ///
    /// Whatever the transformer fails with, unchanged.
    pub fn transform(&self, groups: &[Option<&str>]) -> anyhow::Result<Value> {
        (self.transformer)(groups)
    }
}

#[cfg(test)]
mod tests {
    use std::num::ParseIntError;

    use super::*;

    #[derive(derive_more::Debug, PartialEq)]
    struct Color(String);

    impl Parameter for Color {
        const REGEX: &'static str = "red|blue";
        const NAME: &'static str = "color";
    }

    impl FromStr for Color {
        type Err = ParseIntError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Ok(Self(s.to_owned()))
        }
    }

    #[test]
    fn defaults() {
        let p = ParameterType::new("n", "\\d+", |s: Option<&str>| {
            Ok(s.unwrap_or_default().parse::<u32>()?)
        });
        assert_eq!(p.name(), "n");
        assert_eq!(p.regexps(), ["\\d+"]);
        assert_eq!(p.type_key(), TypeKey::of::<u32>());
        assert!(p.is_used_for_regex_match());
        assert!(p.is_used_for_snippets());
        assert!(!p.is_preferential());
        assert!(!p.is_anonymous());
    }

    #[test]
    fn flags_are_orthogonal() {
        let p = ParameterType::new("n", "\\d+", |_: Option<&str>| Ok(()))
            .preferential(true)
            .use_for_regex_match(false);
        assert!(p.is_preferential());
        assert!(!p.is_used_for_regex_match());
        assert!(p.is_used_for_snippets());
    }

    #[test]
    fn capture_regex_wraps_fragments() {
        let one = ParameterType::new("a", "x+", |_: Option<&str>| Ok(()));
        assert_eq!(one.capture_regex(), "(x+)");

        let many = ParameterType::with_regexps(
            "b",
            ["x+", "y+"],
            |_: &[Option<&str>]| Ok(()),
        );
        assert_eq!(many.capture_regex(), "((?:x+)|(?:y+))");
    }

    #[test]
    fn transforms_groups() {
        let p = ParameterType::with_regexps(
            "pair",
            ["(\\d+)x(\\d+)"],
            |groups: &[Option<&str>]| {
                Ok(groups.iter().flatten().map(|s| s.len()).sum::<usize>())
            },
        );
        let v = p.transform(&[Some("12"), Some("345")]).unwrap();
        assert_eq!(v.downcast::<usize>().unwrap(), 5);
    }

    #[test]
    fn transformer_errors_are_returned_unchanged() {
        let p = ParameterType::new("n", "\\d+", |s: Option<&str>| {
            Ok(s.unwrap_or_default().parse::<u8>()?)
        });
        let err = p.transform(&[Some("300")]).unwrap_err();
        assert!(err.downcast_ref::<ParseIntError>().is_some());
    }

    #[test]
    fn from_parameter_uses_constants() {
        let p = ParameterType::from_parameter::<Color>();
        assert_eq!(p.name(), "color");
        assert_eq!(p.regexps(), ["red|blue"]);

        let v = p.transform(&[Some("red")]).unwrap();
        assert_eq!(v.downcast::<Color>().unwrap(), Color("red".into()));
    }
}
