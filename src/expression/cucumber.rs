// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [Cucumber Expressions][1] compiled into regular expressions.
//!
//! [1]: https://github.com/cucumber/cucumber-expressions#readme

use std::sync::Arc;

use cucumber_expressions::{self as ast, Spanned};
use regex::Regex;

use crate::{
    argument::Argument,
    error::{CucumberExpressionError, Result, UndefinedParameterTypeError},
    parameter::{ParameterType, ParameterTypeRegistry},
};

use super::{unescape, Expression, GroupBuilder, Matcher};

/// [Cucumber Expression][1] with its parameters resolved against a
/// [`ParameterTypeRegistry`].
///
/// ```rust
/// # use cucumber_types::{CucumberExpression, Expression as _, ParameterTypeRegistry};
/// #
/// let registry = ParameterTypeRegistry::default();
/// let expr = CucumberExpression::new(
///     "I have {int} cucumber(s) in my belly/stomach",
///     &registry,
/// )
/// .unwrap();
///
/// let args = expr.match_text("I have 42 cucumbers in my belly").unwrap();
/// assert_eq!(args[0].transform_into::<i32>().unwrap(), 42);
/// assert!(expr.match_text("I have 42 cucumbers in my pocket").is_none());
/// ```
///
/// [1]: https://github.com/cucumber/cucumber-expressions#readme
#[derive(Clone, Debug)]
pub struct CucumberExpression {
    /// Source this [`CucumberExpression`] was created from.
    source: String,

    /// Compiled matcher.
    matcher: Matcher,
}

impl CucumberExpression {
    /// Parses the given `source` and resolves its parameters with the given
    /// `registry`.
    ///
    /// # Errors
    ///
    /// - [`CucumberExpressionError`] if the `source` isn't a valid
    ///   [Cucumber Expression][1].
    /// - [`UndefinedParameterTypeError`] if a parameter isn't defined in the
    ///   `registry`.
    ///
    /// [1]: https://github.com/cucumber/cucumber-expressions#readme
    pub fn new(source: &str, registry: &ParameterTypeRegistry) -> Result<Self> {
        let parsed = ast::Expression::parse(source)
            .map_err(|e| CucumberExpressionError::malformed(source, e))?;

        let mut regex = String::from("^");
        let mut parameter_types = Vec::new();
        for expr in parsed.0 {
            match expr {
                ast::SingleExpression::Alternation(alt) => {
                    regex.push_str(&alternation(&alt));
                }
                ast::SingleExpression::Optional(opt) => {
                    regex.push_str(&optional(&opt));
                }
                ast::SingleExpression::Parameter(param) => {
                    let name: &str = param.fragment();
                    let parameter_type =
                        registry.lookup_by_name(name).ok_or_else(|| {
                            UndefinedParameterTypeError {
                                name: name.to_owned(),
                                expression: source.to_owned(),
                            }
                        })?;
                    regex.push_str(&parameter_type.capture_regex());
                    parameter_types.push(parameter_type);
                }
                ast::SingleExpression::Text(text)
                | ast::SingleExpression::Whitespaces(text) => {
                    regex.push_str(&text_regex(text));
                }
            }
        }
        regex.push('$');

        tracing::trace!(source, regex = %regex, "compiled cucumber expression");
        let tree = GroupBuilder::parse(&regex);
        let regex = Regex::new(&regex)
            .map_err(|e| CucumberExpressionError::regex(source, e))?;

        Ok(Self {
            source: source.to_owned(),
            matcher: Matcher::new(regex, tree, parameter_types),
        })
    }

    /// Returns the [`ParameterType`]s of this [`CucumberExpression`]'s
    /// parameters in order.
    #[must_use]
    pub fn parameter_types(&self) -> &[Arc<ParameterType>] {
        self.matcher.parameter_types()
    }
}

impl Expression for CucumberExpression {
    fn match_text(&self, text: &str) -> Option<Vec<Argument>> {
        self.matcher.match_text(text)
    }

    fn regex(&self) -> &Regex {
        self.matcher.regex()
    }

    fn source(&self) -> &str {
        &self.source
    }
}

/// Regular expression of a literal text, with its escapes resolved.
fn text_regex(text: Spanned<'_>) -> String {
    regex::escape(&unescape(text.fragment()))
}

/// Regular expression of an optional text: `(?:text)?`.
fn optional(opt: &ast::Optional<Spanned<'_>>) -> String {
    format!("(?:{})?", text_regex(opt.0))
}

/// Regular expression of an alternation: `(?:a|b)`.
fn alternation(alt: &ast::Alternation<Spanned<'_>>) -> String {
    let alternatives = alt.0.iter().map(|alternative| {
        alternative
            .iter()
            .map(|part| match part {
                ast::Alternative::Optional(opt) => optional(opt),
                ast::Alternative::Text(text) => text_regex(*text),
            })
            .collect::<String>()
    });
    format!("(?:{})", alternatives.collect::<Vec<_>>().join("|"))
}

#[cfg(test)]
mod tests {
    use crate::{Error, ParameterType};

    use super::*;

    fn compile(source: &str) -> Result<CucumberExpression> {
        CucumberExpression::new(source, &ParameterTypeRegistry::default())
    }

    #[test]
    fn expands_into_anchored_regex() {
        let expr = compile("I have {int} cuke(s) in my belly/stomach").unwrap();
        assert_eq!(
            expr.regex().as_str(),
            "^I have ((?:-?\\d+)|(?:\\d+)) cuke(?:s)? in my (?:belly|stomach)$",
        );
        assert_eq!(expr.source(), "I have {int} cuke(s) in my belly/stomach");
    }

    #[test]
    fn escapes_regex_characters() {
        let expr = compile(r"a.b \(c) $1 \{int}").unwrap();
        assert!(expr.match_text("a.b (c) $1 {int}").is_some());
        assert!(expr.match_text("axb (c) $1 {int}").is_none());
        assert!(expr.parameter_types().is_empty());
    }

    #[test]
    fn matches_whole_text_only() {
        let expr = compile("{int} cukes").unwrap();
        assert!(expr.match_text("3 cukes").is_some());
        assert!(expr.match_text("3 cukes today").is_none());
        assert!(expr.match_text("about 3 cukes").is_none());
    }

    #[test]
    fn transforms_builtins() {
        let expr = compile("{word} said {string} {float} times{}").unwrap();
        let args = expr.match_text(r#"Bob said "hi \"you\"" 1.5 times!"#).unwrap();
        assert_eq!(args.len(), 4);
        assert_eq!(args[0].transform_into::<String>().unwrap(), "Bob");
        assert_eq!(args[1].transform_into::<String>().unwrap(), "hi \"you\"");
        assert_eq!(args[2].transform_into::<f32>().unwrap(), 1.5);
        assert_eq!(args[3].transform_into::<String>().unwrap(), "!");
    }

    #[test]
    fn string_matches_single_quotes() {
        let expr = compile("say {string}").unwrap();
        let args = expr.match_text("say 'it\\'s'").unwrap();
        assert_eq!(args[0].transform_into::<String>().unwrap(), "it's");
    }

    #[test]
    fn undefined_parameter_is_reported() {
        let err = compile("I like {color}").unwrap_err();
        let Error::UndefinedParameterType(err) = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(err.name, "color");
        assert_eq!(err.expression, "I like {color}");
    }

    #[test]
    fn malformed_expression_is_reported() {
        let err = compile("I like {color").unwrap_err();
        let Error::CucumberExpression(err) = err else {
            panic!("unexpected error: {err}");
        };
        assert!(err.is_malformed());
    }

    #[test]
    fn multiple_fragments_form_one_group() {
        let mut registry = ParameterTypeRegistry::default();
        registry
            .define_parameter_type(ParameterType::with_regexps(
                "color",
                ["red|blue", "dark (red|blue)"],
                |groups: &[Option<&str>]| {
                    Ok(groups.first().copied().flatten().map(str::to_owned))
                },
            ))
            .unwrap();
        let expr = CucumberExpression::new("a {color} ball", &registry).unwrap();
        assert_eq!(
            expr.regex().as_str(),
            "^a ((?:red|blue)|(?:dark (red|blue))) ball$",
        );

        let args = expr.match_text("a dark blue ball").unwrap();
        assert_eq!(args.len(), 1);
        let color = args[0].transform_into::<Option<String>>().unwrap();
        assert_eq!(color.as_deref(), Some("blue"));

        let args = expr.match_text("a red ball").unwrap();
        let color = args[0].transform_into::<Option<String>>().unwrap();
        assert_eq!(color, None);
    }
}
