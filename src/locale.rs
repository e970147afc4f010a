// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Locale`] affecting the built-in numeric parameter types.

use std::{convert::Infallible, str::FromStr};

use derive_more::with_trait::Display;
use smart_default::SmartDefault;

/// Language the step texts are written in.
///
/// Only the number format is taken from it: which characters separate the
/// decimal part and group the thousands.
#[derive(Clone, Debug, Display, Eq, PartialEq, SmartDefault)]
#[display("{tag}")]
pub struct Locale {
    /// Language tag this [`Locale`] was created from.
    #[default = "en"]
    tag: String,

    /// Separator of the decimal part.
    #[default('.')]
    decimal_separator: char,

    /// Separator of thousands groups.
    #[default(',')]
    grouping_separator: char,
}

impl Locale {
    /// Creates a [`Locale`] out of a language tag like `en`, `de-DE` or
    /// `fr_FR`.
    ///
    /// Languages this crate doesn't know about get the English number format.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "nl" | "it" | "es" | "pt" | "da" | "id" | "tr" | "el"
            | "ro" | "hr" | "sl" | "sr" => (',', '.'),
            "fr" | "ru" | "pl" | "cs" | "sk" | "sv" | "fi" | "nb" | "no"
            | "uk" | "bg" | "hu" | "lt" | "lv" | "et" => (',', ' '),
            _ => ('.', ','),
        };
        Self { tag, decimal_separator, grouping_separator }
    }

    /// Returns the language tag of this [`Locale`].
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the separator of the decimal part.
    #[must_use]
    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Returns the separator of thousands groups.
    #[must_use]
    pub const fn grouping_separator(&self) -> char {
        self.grouping_separator
    }

    /// Regular expression matching floating point numbers written in this
    /// [`Locale`].
    #[must_use]
    pub fn float_regex(&self) -> String {
        let d = regex::escape(&self.decimal_separator.to_string());
        format!(
            r"(?:[-+]?\d*{d}\d+(?:[eE][-+]?\d+)?)|(?:[-+]?\d+(?:{d}\d*)?(?:[eE][-+]?\d+)?)",
        )
    }

    /// Rewrites a number written in this [`Locale`] into the format
    /// [`str::parse()`] understands.
    #[must_use]
    pub fn normalize_number(&self, number: &str) -> String {
        number
            .chars()
            .filter(|&c| c != self.grouping_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect()
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
