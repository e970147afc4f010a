// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of defining types, looking them up and compiling expressions.
//!
//! All of them surface when a registry is populated or an expression is
//! built. Matching never fails: a text either matches or it doesn't.
//!
//! # Example
//!
//! ```rust
//! use cucumber_types::{error::Error, ParameterType, TypeRegistry};
//!
//! let mut registry = TypeRegistry::default();
//! let err = registry
//!     .define_parameter_type(ParameterType::new(
//!         "int",
//!         r"\d+",
//!         |s: Option<&str>| Ok(s.unwrap_or_default().parse::<u64>()?),
//!     ))
//!     .unwrap_err();
//! assert!(matches!(err, Error::DuplicateTypeName(_)));
//! ```

pub mod ambiguous;
pub mod definition;

use derive_more::with_trait::{Display, From};

pub use self::{
    ambiguous::{AmbiguousRegularExpressionError, AmbiguousTypeError},
    definition::{
        CucumberExpressionError, DuplicateTypeNameError,
        UndefinedParameterTypeError,
    },
};

/// Top-level error of this crate.
#[derive(Clone, Debug, Display, derive_more::with_trait::Error, From)]
pub enum Error {
    /// Type defined under an already taken name.
    #[display("{_0}")]
    DuplicateTypeName(DuplicateTypeNameError),

    /// Malformed expression or conflicting preferential parameter types.
    #[display("{_0}")]
    CucumberExpression(CucumberExpressionError),

    /// Several parameter types produce the looked up type.
    #[display("{_0}")]
    AmbiguousType(AmbiguousTypeError),

    /// Several parameter types match a capturing group and none is
    /// preferential.
    #[display("{_0}")]
    AmbiguousRegularExpression(AmbiguousRegularExpressionError),

    /// Expression references a parameter type that isn't defined.
    #[display("{_0}")]
    UndefinedParameterType(UndefinedParameterTypeError),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Indicates whether this is an [`Error::DuplicateTypeName`].
    #[must_use]
    pub const fn is_duplicate_type_name(&self) -> bool {
        matches!(self, Self::DuplicateTypeName(_))
    }

    /// Indicates whether this is an [`Error::CucumberExpression`].
    #[must_use]
    pub const fn is_cucumber_expression(&self) -> bool {
        matches!(self, Self::CucumberExpression(_))
    }

    /// Indicates whether this is an ambiguity of either kind.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousType(_) | Self::AmbiguousRegularExpression(_),
        )
    }

    /// Indicates whether this is an [`Error::UndefinedParameterType`].
    #[must_use]
    pub const fn is_undefined_parameter_type(&self) -> bool {
        matches!(self, Self::UndefinedParameterType(_))
    }
}
