// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc(
    html_logo_url = "https://avatars.githubusercontent.com/u/91469139?s=128",
    html_favicon_url = "https://avatars.githubusercontent.com/u/91469139?s=256"
)]
#![cfg_attr(any(doc, test), doc = include_str!("../README.md"))]
#![cfg_attr(not(any(doc, test)), doc = env!("CARGO_PKG_NAME"))]
#![deny(nonstandard_style, rustdoc::all, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::absolute_paths,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::as_conversions,
    clippy::assertions_on_result_states,
    clippy::branches_sharing_code,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::fallible_impl_from,
    clippy::get_unwrap,
    clippy::if_then_some_else_none,
    clippy::iter_over_hash_type,
    clippy::let_underscore_untyped,
    clippy::map_err_ignore,
    clippy::missing_const_for_fn,
    clippy::missing_docs_in_private_items,
    clippy::needless_collect,
    clippy::or_fun_call,
    clippy::panic_in_result_fn,
    clippy::pedantic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::redundant_clone,
    clippy::str_to_string,
    clippy::string_slice,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::use_debug,
    clippy::use_self,
    future_incompatible,
    let_underscore_drop,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    semicolon_in_expressions_from_macros,
    unit_bindings,
    unreachable_pub,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod argument;
pub mod data_table;
pub mod doc_string;
pub mod error;
pub mod expression;
pub mod locale;
pub mod parameter;
pub mod step_expression;
pub mod transformer;
pub mod type_registry;

#[doc(inline)]
pub use self::{
    argument::{
        Argument, DataTableArgument, DocStringArgument, ScalarArgument,
    },
    data_table::{DataTable, DataTableType, DataTableTypeRegistry},
    doc_string::{DocString, DocStringType},
    error::{Error, Result},
    expression::{
        CucumberExpression, Expression, ExpressionFactory, Group,
        GroupBuilder, RegularExpression,
    },
    locale::Locale,
    parameter::{Parameter, ParameterType, ParameterTypeRegistry},
    step_expression::StepExpression,
    transformer::{MismatchedTypeError, TypeKey, Value},
    type_registry::TypeRegistry,
};
