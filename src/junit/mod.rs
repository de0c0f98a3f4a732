// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! JUnit-style XML report [`Codec`].
//!
//! Reads `<testsuites>` (or a bare `<testsuite>`) documents, folding nested
//! `<testsuite>`s into their top-level [`Suite`] and recording the nesting
//! path in [`Case::folders`]. Writing regroups those folders back into nested
//! `<testsuite>`s.
//!
//! Metadata without a structural counterpart travels as `<property>`s:
//! - `attachment:<name>` with a `data:` URI value is an [`Attachment`];
//! - `trait:<name>` escapes custom names clashing with these prefixes;
//! - anything else is classified into a [`Trait`].
//!
//! [`Attachment`]: crate::Attachment
//! [`Case::folders`]: crate::Case::folders
//! [`Suite`]: crate::Suite
//! [`Trait`]: crate::Trait

mod cli;
mod reader;
mod writer;

use crate::{
    Codec, Result, ResultStatus, Run,
    defaults::{DerivedIds, ImportDefaults},
};

pub use self::cli::Cli;

/// Prefix of `<property>` names carrying [`Attachment`]s.
///
/// [`Attachment`]: crate::Attachment
pub const ATTACHMENT_PREFIX: &str = "attachment:";

/// Prefix of `<property>` names carrying explicitly named [`Trait`]s.
///
/// [`Trait`]: crate::Trait
pub const TRAIT_PREFIX: &str = "trait:";

/// JUnit-style XML report [`Codec`].
#[derive(Clone, Copy, Debug, Default)]
pub struct JUnit<D = DerivedIds> {
    /// [`Cli`] options of this [`JUnit`] codec.
    cli: Cli,

    /// Fallbacks for data missing in the deserialized reports.
    defaults: D,
}

impl JUnit {
    /// Creates a new [`JUnit`] codec with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D> JUnit<D> {
    /// Replaces the [`Cli`] options of this [`JUnit`] codec.
    #[must_use]
    pub fn with_cli(mut self, cli: Cli) -> Self {
        self.cli = cli;
        self
    }

    /// Replaces the [`ImportDefaults`] of this [`JUnit`] codec.
    #[must_use]
    pub fn with_defaults<E: ImportDefaults>(self, defaults: E) -> JUnit<E> {
        JUnit {
            cli: self.cli,
            defaults,
        }
    }

    /// Returns the [`Cli`] options of this [`JUnit`] codec.
    #[must_use]
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }
}

impl<D: ImportDefaults> Codec for JUnit<D> {
    fn serialize(&self, run: &Run) -> Result<String> {
        writer::write_run(run)
    }

    fn deserialize(&self, text: &str) -> Result<Run> {
        reader::read_run(text, &self.cli, &self.defaults)
    }
}

/// Name of the `<testcase>` child element representing the given
/// [`ResultStatus`].
///
/// [`ResultStatus::Passed`] and [`ResultStatus::NoRun`] have none, so the
/// latter reads back as passed.
#[must_use]
pub const fn result_element(status: ResultStatus) -> Option<&'static str> {
    match status {
        ResultStatus::Failed => Some("failure"),
        ResultStatus::Error => Some("error"),
        ResultStatus::Skipped => Some("skipped"),
        ResultStatus::Blocked => Some("blocked"),
        ResultStatus::Assert => Some("assert"),
        ResultStatus::Crashed => Some("crashed"),
        ResultStatus::Passed | ResultStatus::NoRun => None,
    }
}

/// Splits a `Test collection for <name> (id: <id>)` suite name into its
/// `<name>` and `<id>`.
#[must_use]
pub fn decompose_collection_name(name: &str) -> Option<(&str, &str)> {
    lazy_regex::regex_captures!(r"Test collection for (.*) \(id: (.*)\)", name)
        .map(|(_, name, id)| (name, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_unrepresentable_status_has_no_element() {
        let missing = ResultStatus::ALL
            .into_iter()
            .filter(|s| result_element(*s).is_none())
            .collect::<Vec<_>>();

        assert_eq!(missing, [ResultStatus::Passed, ResultStatus::NoRun]);
    }

    #[test]
    fn decomposes_collection_name() {
        assert_eq!(
            decompose_collection_name("Test collection for Foo (id: abc123)"),
            Some(("Foo", "abc123")),
        );
        assert_eq!(
            decompose_collection_name("Test collection for A (B) (id: 1)"),
            Some(("A (B)", "1")),
        );
        assert_eq!(
            decompose_collection_name("xunit: Test collection for Foo (id: abc)"),
            Some(("Foo", "abc")),
        );
        assert_eq!(decompose_collection_name("Foo"), None);
    }

    #[test]
    fn builder_replaces_options_and_defaults() {
        let codec = JUnit::new()
            .with_cli(Cli {
                max_depth: 3,
                ..Cli::default()
            })
            .with_defaults(|_: Option<&str>, _: &str, case: &str| {
                case.to_uppercase()
            });
        let run = codec
            .deserialize(r#"<testsuites><testsuite name="S"><testcase name="t"/></testsuite></testsuites>"#)
            .unwrap();

        assert_eq!(codec.cli().max_depth, 3);
        assert_eq!(run.suites[0].cases[0].external_id.as_deref(), Some("T"));
    }
}
