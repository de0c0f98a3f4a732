// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![cfg_attr(any(doc, test), doc = include_str!("../README.md"))]
#![cfg_attr(not(any(doc, test)), doc = env!("CARGO_PKG_NAME"))]
#![deny(nonstandard_style, rustdoc::all, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::as_conversions,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::missing_const_for_fn,
    clippy::unwrap_used,
    clippy::use_self,
    future_incompatible,
    let_underscore_drop,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod attachment;
pub mod defaults;
pub mod dialect;
pub mod error;
pub mod folder;
pub mod junit;
pub mod model;
mod xml;
pub mod xunit;

#[doc(inline)]
pub use self::{
    defaults::{DerivedIds, ImportDefaults},
    dialect::{Codec, Dialect},
    error::{Error, Result},
    junit::JUnit,
    model::{
        Attachment, Case, ExportType, ResultStatus, Run, Suite, Trait,
        TraitKind, WellKnown,
    },
    xunit::XUnit,
};
