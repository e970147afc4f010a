// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Doc string arguments of steps.

use std::any::Any;

use derive_more::with_trait::{Debug, Display};

use crate::transformer::{self, DocStringFn, TypeKey, Value};

/// Content of a step's doc string along with its optional content type
/// (`"""json`, for example).
#[derive(Clone, Debug, Default, Display, Eq, PartialEq)]
#[display("{content}")]
pub struct DocString {
    /// Literal content.
    pub content: String,

    /// Content type following the opening delimiter, if any.
    pub content_type: Option<String>,
}

impl DocString {
    /// Creates a new [`DocString`] without a content type.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), content_type: None }
    }

    /// Sets the content type of this [`DocString`].
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl From<&str> for DocString {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for DocString {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Transformer of [`DocString`]s into values of a single type.
#[derive(Clone, Debug)]
pub struct DocStringType {
    /// Content type this [`DocStringType`] is meant for.
    content_type: Option<String>,

    /// [`TypeKey`] of the produced values.
    type_key: TypeKey,

    /// Erased transformer.
    #[debug(skip)]
    transformer: DocStringFn,
}

impl Default for DocStringType {
    fn default() -> Self {
        Self::new(None::<String>, |d: &DocString| Ok(d.clone()))
    }
}

impl DocStringType {
    /// Creates a new [`DocStringType`] producing `T`s.
    #[must_use]
    pub fn new<T, F>(content_type: Option<impl Into<String>>, transformer: F) -> Self
    where
        T: Any + Send,
        F: Fn(&DocString) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            content_type: content_type.map(Into::into),
            type_key: TypeKey::of::<T>(),
            transformer: transformer::doc_string(transformer),
        }
    }

    /// Returns the content type this [`DocStringType`] is meant for.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the [`TypeKey`] of the values this [`DocStringType`] produces.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Transforms the given `doc_string`.
    ///
    /// # Errors
    ///
    /// Whatever the transformer fails with, unchanged.
    pub fn transform(&self, doc_string: &DocString) -> anyhow::Result<Value> {
        (self.transformer)(doc_string)
    }
}
