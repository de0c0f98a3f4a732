// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Group of [`Case`]s sharing a module.

use std::time::Duration;

use super::{Attachment, Case, ResultStatus, Trait};

/// Group of [`Case`]s, usually produced by a single test module.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suite {
    /// Identifier of this [`Suite`] in the system that produced the report.
    pub external_id: Option<String>,

    /// Name of this [`Suite`].
    pub name: String,

    /// Module (assembly) of this [`Suite`].
    ///
    /// Defaults to the [`Suite::name`] when absent, see
    /// [`Suite::module_or_name()`].
    pub module: Option<String>,

    /// Captured standard output.
    pub system_out: Option<String>,

    /// Captured standard error.
    pub system_err: Option<String>,

    /// Project this [`Suite`] belongs to.
    pub project: Option<String>,

    /// Category of this [`Suite`].
    pub category: Option<String>,

    /// [`Case`]s of this [`Suite`].
    pub cases: Vec<Case>,

    /// [`Trait`]s of this [`Suite`].
    pub traits: Vec<Trait>,

    /// [`Attachment`]s of this [`Suite`].
    pub attachments: Vec<Attachment>,
}

impl Suite {
    /// Creates a new empty [`Suite`] with the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a [`Case`] to this [`Suite`].
    #[must_use]
    pub fn with_case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }

    /// Adds a [`Trait`] to this [`Suite`].
    #[must_use]
    pub fn with_trait(mut self, tr: Trait) -> Self {
        self.traits.push(tr);
        self
    }

    /// Returns [`Suite::module`], falling back to the [`Suite::name`].
    #[must_use]
    pub fn module_or_name(&self) -> &str {
        self.module.as_deref().unwrap_or(&self.name)
    }

    /// Number of [`Case`]s.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// Number of [`ResultStatus::Passed`] [`Case`]s.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(ResultStatus::Passed)
    }

    /// Number of [`Case`]s with a [failure-like][1] [`ResultStatus`].
    ///
    /// [1]: ResultStatus::is_failure
    #[must_use]
    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|c| c.result.is_failure()).count()
    }

    /// Number of [`Case`]s with exactly the given [`ResultStatus`].
    #[must_use]
    pub fn count(&self, status: ResultStatus) -> usize {
        self.cases.iter().filter(|c| c.result == status).count()
    }

    /// Sum of all the reported [`Case`] durations.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.cases.iter().filter_map(|c| c.duration).sum()
    }
}
