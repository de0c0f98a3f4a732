// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! xUnit.net-style XML report [`Codec`].
//!
//! Every `<assembly>` becomes a single [`Suite`]: its `<collection>`s are
//! flattened into it, leaving only a [`WellKnown::CollectionName`] trait on
//! each contained [`Case`]. Writing synthesizes exactly one `<collection>`
//! per [`Suite`], so distinct collections aren't restored.
//!
//! The dialect knows only `Pass`, `Fail` and `Skip` results, see
//! [`result_to_xunit()`] for how the other [`ResultStatus`]es collapse.
//!
//! [`Case`]: crate::Case
//! [`Suite`]: crate::Suite
//! [`WellKnown::CollectionName`]: crate::WellKnown::CollectionName

mod reader;
mod writer;

use crate::{
    Codec, Result, ResultStatus, Run,
    defaults::{DerivedIds, ImportDefaults},
};

/// xUnit.net-style XML report [`Codec`].
#[derive(Clone, Copy, Debug, Default)]
pub struct XUnit<D = DerivedIds> {
    /// Fallbacks for data missing in the deserialized reports.
    defaults: D,
}

impl XUnit {
    /// Creates a new [`XUnit`] codec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D> XUnit<D> {
    /// Replaces the [`ImportDefaults`] of this [`XUnit`] codec.
    #[must_use]
    pub fn with_defaults<E: ImportDefaults>(self, defaults: E) -> XUnit<E> {
        XUnit { defaults }
    }
}

impl<D: ImportDefaults> Codec for XUnit<D> {
    fn serialize(&self, run: &Run) -> Result<String> {
        writer::write_run(run)
    }

    fn deserialize(&self, text: &str) -> Result<Run> {
        reader::read_run(text, &self.defaults)
    }
}

/// Maps a [`ResultStatus`] onto a `result` attribute value.
///
/// Anything but [`ResultStatus::Passed`] and [`ResultStatus::Failed`]
/// collapses into `Skip`. The failure details of [`ResultStatus::Error`],
/// [`ResultStatus::Crashed`] and [`ResultStatus::Assert`] are still written
/// as a `<failure>` element.
#[must_use]
pub const fn result_to_xunit(status: ResultStatus) -> &'static str {
    match status {
        ResultStatus::Passed => "Pass",
        ResultStatus::Failed => "Fail",
        ResultStatus::Skipped
        | ResultStatus::Blocked
        | ResultStatus::Error
        | ResultStatus::Crashed
        | ResultStatus::Assert
        | ResultStatus::NoRun => "Skip",
    }
}

/// Maps a `result` attribute value onto a [`ResultStatus`].
///
/// Unknown values read as [`ResultStatus::Skipped`].
#[must_use]
pub fn result_from_xunit(value: &str) -> ResultStatus {
    match value {
        "Pass" => ResultStatus::Passed,
        "Fail" => ResultStatus::Failed,
        _ => ResultStatus::Skipped,
    }
}

/// Indicates whether a `<failure>` element is written for the given
/// [`ResultStatus`].
const fn writes_failure(status: ResultStatus) -> bool {
    !matches!(
        status,
        ResultStatus::Passed
            | ResultStatus::NoRun
            | ResultStatus::Skipped
            | ResultStatus::Blocked,
    )
}
