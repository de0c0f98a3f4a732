// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcome of a single [`Case`] execution.
//!
//! [`Case`]: super::Case

use derive_more::with_trait::Display;

/// Possible outcomes of running a [`Case`].
///
/// Every dialect supports only a subset of these, so exporting may collapse
/// several statuses into one (see [`junit`] and [`xunit`] modules).
///
/// [`Case`]: super::Case
/// [`junit`]: crate::junit
/// [`xunit`]: crate::xunit
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultStatus {
    /// [`Case`] succeeded.
    ///
    /// [`Case`]: super::Case
    #[default]
    Passed,

    /// [`Case`] failed an expectation.
    ///
    /// [`Case`]: super::Case
    Failed,

    /// [`Case`] was deliberately not run.
    ///
    /// [`Case`]: super::Case
    Skipped,

    /// [`Case`] couldn't run because of an unmet precondition.
    ///
    /// [`Case`]: super::Case
    Blocked,

    /// [`Case`] raised an unexpected error.
    ///
    /// [`Case`]: super::Case
    Error,

    /// Test host crashed while running the [`Case`].
    ///
    /// [`Case`]: super::Case
    Crashed,

    /// [`Case`] tripped an assertion outside of its expectations.
    ///
    /// [`Case`]: super::Case
    Assert,

    /// [`Case`] was never scheduled.
    ///
    /// [`Case`]: super::Case
    NoRun,
}

impl ResultStatus {
    /// All the [`ResultStatus`] variants.
    pub const ALL: [Self; 8] = [
        Self::Passed,
        Self::Failed,
        Self::Skipped,
        Self::Blocked,
        Self::Error,
        Self::Crashed,
        Self::Assert,
        Self::NoRun,
    ];

    /// Indicates whether this [`ResultStatus`] counts as a failure in the
    /// derived counters of a [`Run`] or a [`Suite`].
    ///
    /// [`Run`]: super::Run
    /// [`Suite`]: super::Suite
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(
            self,
            Self::Failed | Self::Error | Self::Crashed | Self::Assert,
        )
    }
}
