// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Built-in [`ParameterType`]s every [`ParameterTypeRegistry`] starts with.
//!
//! [`ParameterTypeRegistry`]: super::ParameterTypeRegistry

use std::{any::Any, error::Error as StdError, str::FromStr};

use crate::locale::Locale;

use super::ParameterType;

/// Regular expression fragments of the integer parameter types.
pub(crate) const INTEGER_REGEXPS: [&str; 2] = [r"-?\d+", r"\d+"];

/// Regular expression of the `{word}` parameter type.
pub(crate) const WORD_REGEX: &str = r"[^\s]+";

/// Regular expression of the `{string}` parameter type.
pub(crate) const STRING_REGEX: &str =
    r#""([^"\\]*(?:\\.[^"\\]*)*)"|'([^'\\]*(?:\\.[^'\\]*)*)'"#;

/// Regular expression of the anonymous `{}` parameter type.
pub(crate) const ANONYMOUS_REGEX: &str = ".*";

/// Returns the named built-in [`ParameterType`]s for the given [`Locale`].
pub(crate) fn named(locale: &Locale) -> Vec<ParameterType> {
    vec![
        integer::<i32>("int").use_for_snippets(true).preferential(true),
        integer::<i8>("byte"),
        integer::<i16>("short"),
        integer::<i64>("long"),
        integer::<i128>("biginteger"),
        float::<f32>("float", locale),
        float::<f64>("double", locale)
            .use_for_snippets(true)
            .preferential(true),
        float::<f64>("bigdecimal", locale),
        ParameterType::new("word", WORD_REGEX, |s: Option<&str>| {
            Ok(s.unwrap_or_default().to_owned())
        })
        .use_for_snippets(false),
        ParameterType::with_regexps(
            "string",
            [STRING_REGEX],
            |groups: &[Option<&str>]| {
                Ok(unescape_quotes(
                    groups.iter().copied().flatten().next().unwrap_or_default(),
                ))
            },
        ),
    ]
}

/// Returns the anonymous `{}` [`ParameterType`] passing the matched text on.
pub(crate) fn anonymous() -> ParameterType {
    ParameterType::new("", ANONYMOUS_REGEX, |s: Option<&str>| {
        Ok(s.unwrap_or_default().to_owned())
    })
    .use_for_snippets(false)
    .preferential(true)
    .anonymous()
}

/// Integer [`ParameterType`] parsing into `T`.
fn integer<T>(name: &str) -> ParameterType
where
    T: FromStr + Any + Send,
    T::Err: StdError + Send + Sync + 'static,
{
    ParameterType::with_regexps(
        name,
        INTEGER_REGEXPS,
        |groups: &[Option<&str>]| {
            let s = groups.first().copied().flatten().unwrap_or_default();
            Ok(s.parse::<T>()?)
        },
    )
    .use_for_snippets(false)
}

/// Floating point [`ParameterType`] parsing numbers written in the given
/// [`Locale`] into `T`.
fn float<T>(name: &str, locale: &Locale) -> ParameterType
where
    T: FromStr + Any + Send,
    T::Err: StdError + Send + Sync + 'static,
{
    let regex = locale.float_regex();
    let locale = locale.clone();
    ParameterType::new(name, regex, move |s: Option<&str>| {
        Ok(locale.normalize_number(s.unwrap_or_default()).parse::<T>()?)
    })
    .use_for_snippets(false)
}

/// Removes the backslashes escaping quotes.
fn unescape_quotes(s: &str) -> String {
    s.replace("\\\"", "\"").replace("\\'", "'")
}
