// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level test report.

use std::time::{Duration, SystemTime};

use super::{Attachment, Suite, Trait};

/// Top-level test report: an ordered sequence of [`Suite`]s.
///
/// Counters are always derived from the contained [`Case`]s and never
/// stored.
///
/// [`Case`]: super::Case
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Run {
    /// Identifier of this [`Run`] in the system that produced the report.
    pub external_id: Option<String>,

    /// Name of this [`Run`].
    pub name: Option<String>,

    /// [`SystemTime`] this [`Run`] was created at.
    pub created: Option<SystemTime>,

    /// Module (assembly) of this [`Run`].
    pub module: Option<String>,

    /// Project this [`Run`] belongs to.
    pub project: Option<String>,

    /// Category of this [`Run`].
    pub category: Option<String>,

    /// [`Suite`]s of this [`Run`].
    pub suites: Vec<Suite>,

    /// [`Trait`]s of this [`Run`].
    pub traits: Vec<Trait>,

    /// [`Attachment`]s of this [`Run`].
    pub attachments: Vec<Attachment>,
}

impl Run {
    /// Creates a new empty [`Run`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a [`Suite`] to this [`Run`].
    #[must_use]
    pub fn with_suite(mut self, suite: Suite) -> Self {
        self.suites.push(suite);
        self
    }

    /// Number of [`Case`]s in all the [`Suite`]s.
    ///
    /// [`Case`]: super::Case
    #[must_use]
    pub fn total(&self) -> usize {
        self.suites.iter().map(Suite::total).sum()
    }

    /// Number of passed [`Case`]s in all the [`Suite`]s.
    ///
    /// [`Case`]: super::Case
    #[must_use]
    pub fn passed(&self) -> usize {
        self.suites.iter().map(Suite::passed).sum()
    }

    /// Number of failed [`Case`]s in all the [`Suite`]s.
    ///
    /// [`Case`]: super::Case
    #[must_use]
    pub fn failed(&self) -> usize {
        self.suites.iter().map(Suite::failed).sum()
    }

    /// Sum of all the reported [`Case`] durations.
    ///
    /// [`Case`]: super::Case
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.suites.iter().map(Suite::duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::model::{Case, ResultStatus, Suite};

    use super::*;

    fn sample() -> Run {
        Run::new()
            .with_suite(
                Suite::new("Alpha")
                    .with_case(
                        Case::new("ok").with_duration(Duration::from_millis(250)),
                    )
                    .with_case(
                        Case::new("broken")
                            .with_result(ResultStatus::Failed)
                            .with_duration(Duration::from_millis(750)),
                    ),
            )
            .with_suite(
                Suite::new("Beta")
                    .with_case(Case::new("crash").with_result(ResultStatus::Crashed))
                    .with_case(Case::new("later").with_result(ResultStatus::Skipped)),
            )
    }

    #[test]
    fn counters_are_derived_from_cases() {
        let mut run = sample();

        assert_eq!(run.total(), 4);
        assert_eq!(run.passed(), 1);
        assert_eq!(run.failed(), 2);

        run.suites[1].cases[1].result = ResultStatus::Passed;

        assert_eq!(run.passed(), 2);
        assert_eq!(run.failed(), 2);
    }

    #[test]
    fn duration_sums_present_values_only() {
        let run = sample();

        assert_eq!(run.duration(), Duration::from_secs(1));
        assert_eq!(run.suites[1].duration(), Duration::ZERO);
    }

    #[test]
    fn suite_module_defaults_to_name() {
        let mut suite = Suite::new("Tests.Api");
        assert_eq!(suite.module_or_name(), "Tests.Api");

        suite.module = Some("Tests.Api.dll".into());
        assert_eq!(suite.module_or_name(), "Tests.Api.dll");
    }
}
