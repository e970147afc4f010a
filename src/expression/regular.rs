// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Plain regular expressions whose capturing groups are resolved to
//! [`ParameterType`]s.

use std::sync::Arc;

use regex::Regex;

use crate::{
    argument::Argument,
    error::{CucumberExpressionError, Result},
    parameter::{ParameterType, ParameterTypeRegistry},
    transformer::{self, TypeKey},
};

use super::{Expression, GroupBuilder, Matcher};

/// Regular expression with each top-level capturing group resolved to a
/// [`ParameterType`] by its source.
///
/// Groups no [`ParameterType`] is registered for yield the matched text as a
/// [`String`].
#[derive(Clone, Debug)]
pub struct RegularExpression {
    /// Regular expression as given.
    regex: Regex,

    /// Compiled matcher, anchored to the whole text.
    matcher: Matcher,
}

impl RegularExpression {
    /// Compiles the given `regex` source and resolves its capturing groups
    /// with the given `registry`.
    ///
    /// # Errors
    ///
    /// - [`CucumberExpressionError::Regex`] if the `regex` doesn't compile.
    /// - [`AmbiguousRegularExpressionError`] if a group matches several
    ///   [`ParameterType`]s and none of them is preferential.
    ///
    /// [`AmbiguousRegularExpressionError`]: crate::error::AmbiguousRegularExpressionError
    pub fn new(regex: &str, registry: &ParameterTypeRegistry) -> Result<Self> {
        let compiled = Regex::new(regex)
            .map_err(|e| CucumberExpressionError::regex(regex, e))?;
        Self::from_regex(compiled, registry)
    }

    /// Resolves the capturing groups of the given compiled `regex` with the
    /// given `registry`.
    ///
    /// # Errors
    ///
    /// [`AmbiguousRegularExpressionError`] if a group matches several
    /// [`ParameterType`]s and none of them is preferential.
    ///
    /// [`AmbiguousRegularExpressionError`]: crate::error::AmbiguousRegularExpressionError
    pub fn from_regex(
        regex: Regex,
        registry: &ParameterTypeRegistry,
    ) -> Result<Self> {
        let source = regex.as_str();
        let tree = GroupBuilder::parse(source);
        let parameter_types = tree
            .children()
            .iter()
            .map(|group| {
                let fragment = group.source();
                Ok(registry
                    .resolve_regexp(fragment, source, None)?
                    .unwrap_or_else(|| Arc::new(pass_through(fragment))))
            })
            .collect::<Result<Vec<_>>>()?;

        let anchored = Regex::new(&format!("^(?:{source})$"))
            .map_err(|e| CucumberExpressionError::regex(source, e))?;
        tracing::trace!(
            regex = source,
            parameters = parameter_types.len(),
            "compiled regular expression",
        );

        Ok(Self {
            matcher: Matcher::new(anchored, tree, parameter_types),
            regex,
        })
    }

    /// Returns the [`ParameterType`]s of this [`RegularExpression`]'s
    /// capturing groups in order.
    #[must_use]
    pub fn parameter_types(&self) -> &[Arc<ParameterType>] {
        self.matcher.parameter_types()
    }
}

impl Expression for RegularExpression {
    fn match_text(&self, text: &str) -> Option<Vec<Argument>> {
        self.matcher.match_text(text)
    }

    fn regex(&self) -> &Regex {
        &self.regex
    }

    fn source(&self) -> &str {
        self.regex.as_str()
    }
}

/// Unnamed [`ParameterType`] passing the text matched by a `fragment` on.
fn pass_through(fragment: &str) -> ParameterType {
    ParameterType::erased(
        String::new(),
        vec![fragment.to_owned()],
        TypeKey::of::<String>(),
        transformer::single(|s: Option<&str>| {
            Ok(s.unwrap_or_default().to_owned())
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::{Error, ParameterType};

    use super::*;

    const CAPITALISED_WORD: &str = r"[A-Z]+\w+";

    #[test]
    fn resolves_groups_by_fragment() {
        let registry = ParameterTypeRegistry::default();
        let expr = RegularExpression::new(
            r"^I have (\d+) (\w+) in (.*)$",
            &registry,
        )
        .unwrap();
        let names = expr
            .parameter_types()
            .iter()
            .map(|p| p.name().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, ["int", "", ""]);

        let args = expr.match_text("I have 7 cukes in my belly").unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args[0].transform_into::<i32>().unwrap(), 7);
        assert_eq!(args[1].transform_into::<String>().unwrap(), "cukes");
        assert_eq!(args[2].transform_into::<String>().unwrap(), "my belly");
    }

    #[test]
    fn integer_groups_resolve_to_int() {
        let registry = ParameterTypeRegistry::default();
        for regex in [r"^(\d+)$", r"^(-?\d+)$"] {
            let expr = RegularExpression::new(regex, &registry).unwrap();
            assert_eq!(expr.parameter_types()[0].name(), "int", "{regex}");

            let args = expr.match_text("12").unwrap();
            assert_eq!(args[0].transform_into::<i32>().unwrap(), 12, "{regex}");
        }
    }

    #[test]
    fn keeps_regex_as_given() {
        let registry = ParameterTypeRegistry::default();
        let expr = RegularExpression::new(r"(\d+) cukes", &registry).unwrap();
        assert_eq!(expr.regex().as_str(), r"(\d+) cukes");
        assert_eq!(expr.source(), r"(\d+) cukes");
        assert!(expr.match_text("3 cukes").is_some());
        assert!(expr.match_text("3 cukes and more").is_none());
    }

    #[test]
    fn nested_groups_feed_the_transformer() {
        let mut registry = ParameterTypeRegistry::default();
        registry
            .define_parameter_type(ParameterType::with_regexps(
                "size",
                [r"(\d+)x(\d+)"],
                |groups: &[Option<&str>]| {
                    groups
                        .iter()
                        .map(|g| Ok(g.unwrap_or_default().parse::<u32>()?))
                        .product::<anyhow::Result<u32>>()
                },
            ))
            .unwrap();
        let expr =
            RegularExpression::new(r"^a ((\d+)x(\d+)) box$", &registry).unwrap();
        let args = expr.match_text("a 3x4 box").unwrap();
        assert_eq!(args[0].transform_into::<u32>().unwrap(), 12);
    }

    #[test]
    fn ambiguous_group_fails_at_construction() {
        let mut registry = ParameterTypeRegistry::default();
        for name in ["name", "person"] {
            registry
                .define_parameter_type(ParameterType::new(
                    name,
                    CAPITALISED_WORD,
                    |s: Option<&str>| Ok(s.map(str::to_owned)),
                ))
                .unwrap();
        }
        let err =
            RegularExpression::new(r"^([A-Z]+\w+) met ([A-Z]+\w+)$", &registry)
                .unwrap_err();
        let Error::AmbiguousRegularExpression(err) = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(err.fragment, CAPITALISED_WORD);
        assert_eq!(
            err.suggestions,
            [
                "{name} met {name}",
                "{name} met {person}",
                "{person} met {name}",
                "{person} met {person}",
            ],
        );
    }

    #[test]
    fn invalid_regex_is_reported() {
        let registry = ParameterTypeRegistry::default();
        let err = RegularExpression::new("(unclosed", &registry).unwrap_err();
        assert!(matches!(
            err,
            Error::CucumberExpression(CucumberExpressionError::Regex { .. }),
        ));
    }
}
