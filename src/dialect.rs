// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Supported report dialects and the [`Codec`] abstraction over them.

use derive_more::with_trait::Display;
use quick_xml::events::Event;

use crate::{
    JUnit, Result, XUnit,
    model::{Run, TraitKind, WellKnown},
};

/// Bidirectional converter between a [`Run`] and a textual report.
pub trait Codec {
    /// Serializes the given [`Run`] into a report document.
    ///
    /// # Errors
    ///
    /// If writing the document fails.
    fn serialize(&self, run: &Run) -> Result<String>;

    /// Deserializes a report document into a fresh [`Run`].
    ///
    /// # Errors
    ///
    /// If the document is malformed. No partial [`Run`] is produced then.
    fn deserialize(&self, text: &str) -> Result<Run>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn serialize(&self, run: &Run) -> Result<String> {
        (**self).serialize(run)
    }

    fn deserialize(&self, text: &str) -> Result<Run> {
        (**self).deserialize(text)
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    fn serialize(&self, run: &Run) -> Result<String> {
        (**self).serialize(run)
    }

    fn deserialize(&self, text: &str) -> Result<Run> {
        (**self).deserialize(text)
    }
}

/// [`WellKnown`] kinds a JUnit-style report represents structurally.
const JUNIT_NATIVE: &[WellKnown] = &[
    WellKnown::TestId,
    WellKnown::Name,
    WellKnown::Result,
    WellKnown::Line,
    WellKnown::Duration,
    WellKnown::ClassName,
    WellKnown::SystemOut,
    WellKnown::SystemErr,
    WellKnown::FailureMessage,
    WellKnown::CallStack,
    WellKnown::FailureType,
];

/// [`WellKnown`] kinds an xUnit.net-style report represents structurally.
const XUNIT_NATIVE: &[WellKnown] = &[
    WellKnown::TestId,
    WellKnown::Name,
    WellKnown::Result,
    WellKnown::ClassName,
    WellKnown::Method,
    WellKnown::Module,
    WellKnown::FailureMessage,
    WellKnown::Line,
    WellKnown::Duration,
    WellKnown::SystemOut,
    WellKnown::FailureType,
];

/// Supported report dialects.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum Dialect {
    /// `testsuites > testsuite+ > testcase+`, with nestable `testsuite`s.
    #[display("junit")]
    #[value(name = "junit")]
    JUnit,

    /// `assemblies > assembly+ > collection+ > test+`.
    #[display("xunit")]
    #[value(name = "xunit")]
    XUnit,
}

impl Dialect {
    /// [`WellKnown`] kinds this [`Dialect`] represents as native attributes
    /// or elements, and so never emits as generic properties or traits.
    #[must_use]
    pub const fn native_kinds(self) -> &'static [WellKnown] {
        match self {
            Self::JUnit => JUNIT_NATIVE,
            Self::XUnit => XUNIT_NATIVE,
        }
    }

    /// Indicates whether the given [`TraitKind`] is native to this
    /// [`Dialect`].
    #[must_use]
    pub fn is_native(self, kind: &TraitKind) -> bool {
        kind.well_known()
            .is_some_and(|k| self.native_kinds().contains(&k))
    }

    /// Sniffs the [`Dialect`] of a document by its root element, without
    /// parsing the rest of it.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let mut reader = quick_xml::Reader::from_str(text);
        loop {
            match reader.read_event() {
                Ok(Event::Start(e) | Event::Empty(e)) => {
                    return match e.local_name().as_ref() {
                        b"testsuites" | b"testsuite" => Some(Self::JUnit),
                        b"assemblies" | b"assembly" => Some(Self::XUnit),
                        _ => None,
                    };
                }
                Ok(Event::Eof) | Err(_) => return None,
                Ok(_) => {}
            }
        }
    }

    /// Returns a [`Codec`] of this [`Dialect`] with default options.
    #[must_use]
    pub fn codec(self) -> Box<dyn Codec + Send + Sync> {
        match self {
            Self::JUnit => Box::new(JUnit::new()),
            Self::XUnit => Box::new(XUnit::new()),
        }
    }
}
