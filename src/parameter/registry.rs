// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`ParameterTypeRegistry`] definition.

use std::{any::Any, collections::HashMap, sync::Arc};

use itertools::Itertools as _;
use lazy_regex::regex;
use linked_hash_map::LinkedHashMap;
use regex::Regex;

use crate::{
    error::{
        AmbiguousRegularExpressionError, AmbiguousTypeError,
        CucumberExpressionError, DuplicateTypeNameError, Result,
    },
    expression::{unescape, GroupBuilder},
    locale::Locale,
    transformer::TypeKey,
};

use super::{builtin, ParameterType};

/// Registry of [`ParameterType`]s, indexed by name, by regular expression
/// fragment and by produced type.
///
/// Every registry starts with the built-in parameter types (`{int}`,
/// `{float}`, `{word}`, `{string}`, `{}` and the like), whose numeric formats
/// follow the [`Locale`] it's created with.
///
/// # Concurrency
///
/// Defining takes `&mut self`, lookups take `&self`. Once populated, a
/// registry may be shared between threads (behind an [`Arc`], for example)
/// and looked up concurrently.
#[derive(Clone, Debug)]
pub struct ParameterTypeRegistry {
    /// [`Locale`] of the built-in numeric parameter types.
    locale: Locale,

    /// [`ParameterType`]s in definition order, keyed by name.
    by_name: LinkedHashMap<String, Arc<ParameterType>>,

    /// [`ParameterType`]s in definition order, keyed by each of their
    /// regular expression fragments.
    by_regexp: HashMap<String, Vec<Arc<ParameterType>>>,

    /// [`ParameterType`]s in definition order, keyed by produced type.
    by_type: HashMap<TypeKey, Vec<Arc<ParameterType>>>,
}

impl Default for ParameterTypeRegistry {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl ParameterTypeRegistry {
    /// Creates a new [`ParameterTypeRegistry`] with the built-in
    /// [`ParameterType`]s defined for the given [`Locale`].
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        let mut this = Self {
            by_name: LinkedHashMap::new(),
            by_regexp: HashMap::new(),
            by_type: HashMap::new(),
            locale,
        };
        for p in builtin::named(&this.locale) {
            this.insert(Arc::new(p));
        }
        this.insert(Arc::new(builtin::anonymous()));
        this
    }

    /// Returns the [`Locale`] of the built-in numeric parameter types.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Defines the given [`ParameterType`].
    ///
    /// Nothing is defined if an error is returned.
    ///
    /// # Errors
    ///
    /// - [`CucumberExpressionError::IllegalParameterName`] if the name is
    ///   empty or contains any of `{`, `}`, `(`, `)`, `\` or `/`.
    /// - [`DuplicateTypeNameError`] if a [`ParameterType`] with the same name
    ///   is defined already.
    /// - [`CucumberExpressionError::DuplicatePreferential`] if the
    ///   [`ParameterType`] is preferential and shares a regular expression
    ///   fragment with another preferential one.
    pub fn define_parameter_type(
        &mut self,
        parameter_type: ParameterType,
    ) -> Result<()> {
        let name = parameter_type.name();
        if name.is_empty() || regex!(r"[{}()\\/]").is_match(name) {
            return Err(CucumberExpressionError::illegal_parameter_name(name).into());
        }
        if self.by_name.contains_key(name) {
            return Err(DuplicateTypeNameError::parameter(name).into());
        }
        if parameter_type.is_preferential()
            && parameter_type.is_used_for_regex_match()
        {
            for regexp in parameter_type.regexps() {
                let existing = self
                    .by_regexp
                    .get(regexp)
                    .into_iter()
                    .flatten()
                    .find(|q| q.is_preferential() && q.is_used_for_regex_match());
                if let Some(existing) = existing {
                    return Err(CucumberExpressionError::duplicate_preferential(
                        regexp,
                        existing.name(),
                        name,
                    )
                    .into());
                }
            }
        }

        tracing::debug!(
            name,
            regexps = ?parameter_type.regexps(),
            ty = %parameter_type.type_key(),
            preferential = parameter_type.is_preferential(),
            "defined parameter type",
        );
        self.insert(Arc::new(parameter_type));
        Ok(())
    }

    /// Returns the [`ParameterType`] registered under the given `name`.
    ///
    /// The anonymous `{}` parameter type is registered under the empty name.
    #[must_use]
    pub fn lookup_by_name(&self, name: &str) -> Option<Arc<ParameterType>> {
        tracing::trace!(name, "looking up parameter type by name");
        self.by_name.get(name).cloned()
    }

    /// Returns the only [`ParameterType`] producing `T`.
    ///
    /// # Errors
    ///
    /// With [`AmbiguousTypeError`] if several [`ParameterType`]s produce `T`.
    pub fn lookup_by_type<T: Any>(
        &self,
    ) -> std::result::Result<Option<Arc<ParameterType>>, AmbiguousTypeError>
    {
        self.lookup_by_type_key(TypeKey::of::<T>())
    }

    /// Returns the only [`ParameterType`] producing the type identified by
    /// `type_key`.
    ///
    /// # Errors
    ///
    /// With [`AmbiguousTypeError`] if several [`ParameterType`]s produce it.
    pub fn lookup_by_type_key(
        &self,
        type_key: TypeKey,
    ) -> std::result::Result<Option<Arc<ParameterType>>, AmbiguousTypeError>
    {
        tracing::trace!(ty = %type_key, "looking up parameter type by type");
        let candidates =
            self.by_type.get(&type_key).map(Vec::as_slice).unwrap_or_default();
        single(type_key, candidates.iter().cloned())
    }

    /// Returns the only [`ParameterType`] producing a type with the given
    /// name, as rendered by [`std::any::type_name()`].
    ///
    /// # Errors
    ///
    /// With [`AmbiguousTypeError`] if several [`ParameterType`]s produce it.
    pub fn lookup_by_type_name(
        &self,
        type_name: &str,
    ) -> std::result::Result<Option<Arc<ParameterType>>, AmbiguousTypeError>
    {
        tracing::trace!(type_name, "looking up parameter type by type name");
        let Some(type_key) = self
            .by_type
            .keys()
            .find(|key| key.name() == type_name)
            .copied()
        else {
            return Ok(None);
        };
        self.lookup_by_type_key(type_key)
    }

    /// Returns the [`ParameterType`] a capturing group with the given
    /// `fragment` source resolves to.
    ///
    /// Only [`ParameterType`]s used for regular expression matching take
    /// part. If several of them share the `fragment`, the preferential one
    /// wins.
    ///
    /// `regex` is the whole regular expression the fragment was taken from,
    /// and `text` the one it's matched against: they're used for suggesting
    /// replacements in the error.
    ///
    /// # Errors
    ///
    /// With [`AmbiguousRegularExpressionError`] if several [`ParameterType`]s
    /// share the `fragment` and none of them is preferential.
    pub fn lookup_by_regexp(
        &self,
        fragment: &str,
        regex: &Regex,
        text: &str,
    ) -> std::result::Result<
        Option<Arc<ParameterType>>,
        AmbiguousRegularExpressionError,
    > {
        self.resolve_regexp(fragment, regex.as_str(), Some(text))
    }

    /// Resolves the `fragment` of the `regex` source, optionally taking the
    /// literal parts of suggestions from the matched `text`.
    pub(crate) fn resolve_regexp(
        &self,
        fragment: &str,
        regex: &str,
        text: Option<&str>,
    ) -> std::result::Result<
        Option<Arc<ParameterType>>,
        AmbiguousRegularExpressionError,
    > {
        tracing::trace!(fragment, regex, "looking up parameter type by regexp");
        let candidates = self.regex_candidates(fragment).collect::<Vec<_>>();
        match candidates.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(Arc::clone(only))),
            many => {
                if let Some(preferential) =
                    many.iter().find(|p| p.is_preferential())
                {
                    return Ok(Some(Arc::clone(preferential)));
                }
                Err(AmbiguousRegularExpressionError::new(
                    regex,
                    fragment,
                    many.iter().copied().cloned(),
                    self.suggestions(regex, text),
                ))
            }
        }
    }

    /// Iterates over all the defined [`ParameterType`]s in definition order,
    /// built-in ones first.
    pub fn parameter_types(&self) -> impl Iterator<Item = &Arc<ParameterType>> {
        self.by_name.values()
    }

    /// Iterates over the [`ParameterType`]s used for regular expression
    /// matching which have the given `fragment`.
    fn regex_candidates(
        &self,
        fragment: &str,
    ) -> impl Iterator<Item = &Arc<ParameterType>> {
        self.by_regexp
            .get(fragment)
            .into_iter()
            .flatten()
            .filter(|p| p.is_used_for_regex_match())
    }

    /// Generates [Cucumber Expressions][1] which could replace the given
    /// regular expression, one per combination of the parameter types its
    /// top-level capturing groups may resolve to.
    ///
    /// [1]: https://github.com/cucumber/cucumber-expressions#readme
    fn suggestions(&self, regex: &str, text: Option<&str>) -> Vec<String> {
        let root = GroupBuilder::parse(regex);
        let groups = root.children();
        let literals = text
            .and_then(|t| literals_of_text(regex, &root, t))
            .unwrap_or_else(|| literals_of_source(regex, &root));

        let Some((first, rest)) = literals.split_first() else {
            return vec![];
        };
        let mut suggestions = vec![escape(first)];
        for (group, literal) in groups.iter().zip(rest) {
            let names = self.snippet_names(group.source());
            suggestions = suggestions
                .iter()
                .cartesian_product(&names)
                .map(|(prefix, name)| {
                    format!("{prefix}{{{name}}}{}", escape(literal))
                })
                .collect();
        }
        suggestions
    }

    /// Returns the sorted names of the [`ParameterType`]s a group with the
    /// given `fragment` could be written as.
    fn snippet_names(&self, fragment: &str) -> Vec<String> {
        let names = self
            .regex_candidates(fragment)
            .filter(|p| p.is_used_for_snippets())
            .map(|p| p.name().to_owned())
            .sorted()
            .collect::<Vec<_>>();
        if names.is_empty() { vec![String::new()] } else { names }
    }

    /// Adds the given [`ParameterType`] to all the indices.
    fn insert(&mut self, parameter_type: Arc<ParameterType>) {
        for regexp in parameter_type.regexps() {
            self.by_regexp
                .entry(regexp.clone())
                .or_default()
                .push(Arc::clone(&parameter_type));
        }
        if !parameter_type.is_anonymous() {
            self.by_type
                .entry(parameter_type.type_key())
                .or_default()
                .push(Arc::clone(&parameter_type));
        }
        drop(
            self.by_name
                .insert(parameter_type.name().to_owned(), parameter_type),
        );
    }
}

/// Returns the only candidate, if any.
fn single(
    type_key: TypeKey,
    mut candidates: impl ExactSizeIterator<Item = Arc<ParameterType>>,
) -> std::result::Result<Option<Arc<ParameterType>>, AmbiguousTypeError> {
    if candidates.len() > 1 {
        return Err(AmbiguousTypeError::new(type_key, candidates));
    }
    Ok(candidates.next())
}

/// Splits the `text` matched by the `regex` into the literal parts around its
/// top-level capturing groups.
///
/// Returns [`None`] if the `text` doesn't match or some group doesn't
/// participate in the match.
fn literals_of_text(
    regex: &str,
    root: &GroupBuilder,
    text: &str,
) -> Option<Vec<String>> {
    let captures = Regex::new(regex).ok()?.captures(text)?;
    let mut literals = Vec::with_capacity(root.children().len() + 1);
    let mut last = 0;
    for group in root.children() {
        let m = captures.get(group.index())?;
        literals.push(text.get(last..m.start())?.to_owned());
        last = m.end();
    }
    literals.push(text.get(last..)?.to_owned());
    Some(literals)
}

/// Splits the `regex` source into the literal parts around its top-level
/// capturing groups, dropping anchors and escapes.
fn literals_of_source(regex: &str, root: &GroupBuilder) -> Vec<String> {
    let mut literals = Vec::with_capacity(root.children().len() + 1);
    let mut last = 0;
    for group in root.children() {
        let (start, end) = group.span();
        // Both `(` and `)` are single bytes.
        let open = regex
            .get(..start)
            .and_then(|s| s.rfind('('))
            .unwrap_or(start);
        literals.push(unescape(regex.get(last..open).unwrap_or_default()));
        last = (end + 1).min(regex.len());
    }
    literals.push(unescape(regex.get(last..).unwrap_or_default()));

    if let Some(first) = literals.first_mut() {
        if first.starts_with('^') {
            _ = first.remove(0);
        }
    }
    if let Some(last) = literals.last_mut() {
        if last.ends_with('$') {
            _ = last.pop();
        }
    }
    literals
}

/// Escapes the characters having a special meaning in
/// [Cucumber Expressions][1].
///
/// [1]: https://github.com/cucumber/cucumber-expressions#readme
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '{' | '(' | '/') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::*;

    const CAPITALISED_WORD: &str = r"[A-Z]+\w+";

    #[derive(Debug)]
    struct Name;

    fn name(name: &str, regex: &str) -> ParameterType {
        ParameterType::new(name, regex, |_: Option<&str>| Ok(Name))
    }

    #[test]
    fn defines_builtins() {
        let registry = ParameterTypeRegistry::default();
        for name in [
            "int", "byte", "short", "long", "biginteger", "float", "double",
            "bigdecimal", "word", "string", "",
        ] {
            assert!(registry.lookup_by_name(name).is_some(), "{name}");
        }
        let int = registry.lookup_by_type::<i32>().unwrap().unwrap();
        assert_eq!(int.name(), "int");
        // `{}` isn't indexed by type, leaving `{word}` and `{string}`.
        assert!(registry.lookup_by_type::<String>().is_err());
    }

    #[test]
    fn rejects_illegal_names() {
        let mut registry = ParameterTypeRegistry::default();
        for illegal in ["", "a{b", "a}", "(x", "x)", "a\\b", "a/b"] {
            let err = registry
                .define_parameter_type(name(illegal, "x"))
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::CucumberExpression(
                        CucumberExpressionError::IllegalParameterName { .. },
                    ),
                ),
                "{illegal}",
            );
        }
    }

    #[test]
    fn rejects_duplicate_name_atomically() {
        let mut registry = ParameterTypeRegistry::default();
        registry.define_parameter_type(name("color", "red")).unwrap();

        let err = registry
            .define_parameter_type(name("color", "blue"))
            .unwrap_err();
        assert_eq!(err.to_string(), "There is already a parameter type with name color");
        assert_eq!(
            registry.lookup_by_name("color").unwrap().regexps(),
            ["red"],
        );
        assert!(registry.regex_candidates("blue").next().is_none());
    }

    #[test]
    fn preferential_conflict_ignores_regex_match_opt_outs() {
        let mut registry = ParameterTypeRegistry::default();
        registry
            .define_parameter_type(name("a", "x").preferential(true))
            .unwrap();
        registry
            .define_parameter_type(
                name("b", "x").preferential(true).use_for_regex_match(false),
            )
            .unwrap();
        assert!(registry
            .define_parameter_type(name("c", "x").preferential(true))
            .is_err());
    }

    #[test]
    fn lookup_by_regexp_skips_opted_out_types() {
        let mut registry = ParameterTypeRegistry::default();
        registry.define_parameter_type(name("a", "x")).unwrap();
        registry
            .define_parameter_type(name("b", "x").use_for_regex_match(false))
            .unwrap();

        let re = Regex::new("(x)").unwrap();
        let found = registry.lookup_by_regexp("x", &re, "x").unwrap().unwrap();
        assert_eq!(found.name(), "a");
        assert!(registry.lookup_by_regexp("y", &re, "x").unwrap().is_none());
    }

    #[test]
    fn lookup_by_type_name_uses_rendered_name() {
        let registry = ParameterTypeRegistry::default();
        let long = registry.lookup_by_type_name("i64").unwrap().unwrap();
        assert_eq!(long.name(), "long");
        assert!(registry.lookup_by_type_name("u64").unwrap().is_none());
    }

    #[test]
    fn suggestions_fall_back_to_regex_source() {
        let mut registry = ParameterTypeRegistry::default();
        registry.define_parameter_type(name("a", CAPITALISED_WORD)).unwrap();
        registry.define_parameter_type(name("b", CAPITALISED_WORD)).unwrap();

        let suggestions = registry.suggestions(r"^I see (\d+) \(or ([A-Z]+\w+)\)$", None);
        assert_eq!(
            suggestions,
            [r"I see {int} \(or {a})", r"I see {int} \(or {b})"],
        );
    }

    #[test]
    fn suggestions_use_anonymous_for_unknown_fragments() {
        let registry = ParameterTypeRegistry::default();
        let suggestions = registry.suggestions("it's (.+)", Some("it's late"));
        assert_eq!(suggestions, ["it's {}"]);
    }
}
