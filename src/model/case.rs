// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Single executed test.

use std::time::Duration;

use super::{Attachment, ResultStatus, Trait, WellKnown, traits};

/// Single executed test of a [`Suite`].
///
/// [`Suite`]: super::Suite
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Case {
    /// Name of this [`Case`].
    pub name: String,

    /// Identifier of this [`Case`] in the system that produced the report.
    pub external_id: Option<String>,

    /// Fully qualified name of the class declaring this [`Case`].
    pub class_name: Option<String>,

    /// Name of the method implementing this [`Case`].
    pub method: Option<String>,

    /// Module (assembly) this [`Case`] is compiled into.
    pub module: Option<String>,

    /// Outcome of this [`Case`].
    pub result: ResultStatus,

    /// Execution time, if reported.
    pub duration: Option<Duration>,

    /// Failure (or skip) message.
    pub message: Option<String>,

    /// Call stack of a failure.
    pub call_stack: Option<String>,

    /// Exception or failure type.
    pub failure_type: Option<String>,

    /// Captured standard output.
    pub system_out: Option<String>,

    /// Captured standard error.
    pub system_err: Option<String>,

    /// Path from the [`Suite`] root to this [`Case`], exclusive of the
    /// [`Suite`] name.
    ///
    /// [`Suite`]: super::Suite
    pub folders: Vec<String>,

    /// [`Trait`]s of this [`Case`].
    pub traits: Vec<Trait>,

    /// [`Attachment`]s of this [`Case`].
    pub attachments: Vec<Attachment>,
}

impl Case {
    /// Creates a new [`ResultStatus::Passed`] [`Case`] with the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the [`ResultStatus`] of this [`Case`].
    #[must_use]
    pub fn with_result(mut self, result: ResultStatus) -> Self {
        self.result = result;
        self
    }

    /// Sets the execution time of this [`Case`].
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Adds a [`Trait`] to this [`Case`].
    #[must_use]
    pub fn with_trait(mut self, tr: Trait) -> Self {
        self.traits.push(tr);
        self
    }

    /// Adds an [`Attachment`] to this [`Case`].
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Returns the value of the first [`Trait`] of the given [`WellKnown`]
    /// kind.
    #[must_use]
    pub fn trait_value(&self, kind: WellKnown) -> Option<&str> {
        traits::find(&self.traits, kind)
    }
}
