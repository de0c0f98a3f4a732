// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of the JUnit-style codec.

use smart_default::SmartDefault;

use crate::folder;

/// CLI options of a [`JUnit`] [`Codec`].
///
/// [`Codec`]: crate::Codec
/// [`JUnit`]: super::JUnit
#[derive(Clone, Copy, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Decompose `Test collection for <name> (id: <id>)` suite names, as
    /// produced by xUnit.net collections exported through JUnit, back into
    /// a name and an external id.
    #[arg(
        id = "junit-xunit-collection-name",
        long = "junit-xunit-collection-name",
        global = true
    )]
    pub process_xunit_collection_name: bool,

    /// Maximum depth of nested `<testsuite>` elements to accept.
    #[arg(
        id = "junit-max-depth",
        long = "junit-max-depth",
        value_name = "N",
        default_value_t = folder::DEFAULT_MAX_DEPTH,
        global = true
    )]
    #[default(folder::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}
