// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Canonical, dialect-agnostic test report model.
//!
//! The model is a pure tree: a [`Run`] owns its [`Suite`]s, a [`Suite`] owns
//! its [`Case`]s, and every node owns its [`Trait`]s and [`Attachment`]s.
//! There are no back-references, so independent trees may be processed in
//! parallel freely.

mod attachment;
mod case;
mod run;
mod status;
mod suite;
pub mod traits;

#[doc(inline)]
pub use self::{
    attachment::Attachment,
    case::Case,
    run::Run,
    status::ResultStatus,
    suite::Suite,
    traits::{ExportType, Trait, TraitKind, WellKnown},
};
