// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Trait`]s: metadata values attached to a [`Run`], a [`Suite`] or a
//! [`Case`], and their classification.
//!
//! [`Case`]: super::Case
//! [`Run`]: super::Run
//! [`Suite`]: super::Suite

use std::fmt;

use derive_more::with_trait::Display;

/// Metadata names every dialect agrees on.
///
/// Names are matched case-sensitively, see [`WellKnown::from_name()`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WellKnown {
    /// External identifier of a test.
    TestId,
    /// Name of a test.
    Name,
    /// Outcome of a test.
    Result,
    /// Source line a test is declared at.
    Line,
    /// Execution time.
    Duration,
    /// Fully qualified class declaring a test.
    ClassName,
    /// Method implementing a test.
    Method,
    /// Module a test lives in.
    Module,
    /// Assembly (binary) a test is compiled into.
    Assembly,
    /// Captured standard output.
    SystemOut,
    /// Captured standard error.
    SystemErr,
    /// Failure message.
    FailureMessage,
    /// Failure call stack.
    CallStack,
    /// Exception or failure type.
    FailureType,
    /// Name of an xUnit.net test collection.
    CollectionName,
    /// Milestone a test is planned for.
    Milestone,
    /// Release a test belongs to.
    Release,
    /// Free-form category.
    Category,
    /// MSTest-style test category.
    TestCategory,
    /// Priority of a test.
    Priority,
    /// Person responsible for a test.
    Owner,
    /// Project a test belongs to.
    Project,
    /// Product feature under test.
    Feature,
    /// Product component under test.
    Component,
    /// Product area under test.
    Area,
    /// Free-form tag.
    Tag,
    /// Human-readable description.
    Description,
    /// Environment a test ran in.
    Environment,
    /// Browser a test ran in.
    Browser,
    /// Commit under test.
    Commit,
    /// Branch under test.
    Branch,
    /// CI system that produced the report.
    Ci,
}

impl WellKnown {
    /// All the [`WellKnown`] kinds.
    pub const ALL: [Self; 32] = [
        Self::TestId,
        Self::Name,
        Self::Result,
        Self::Line,
        Self::Duration,
        Self::ClassName,
        Self::Method,
        Self::Module,
        Self::Assembly,
        Self::SystemOut,
        Self::SystemErr,
        Self::FailureMessage,
        Self::CallStack,
        Self::FailureType,
        Self::CollectionName,
        Self::Milestone,
        Self::Release,
        Self::Category,
        Self::TestCategory,
        Self::Priority,
        Self::Owner,
        Self::Project,
        Self::Feature,
        Self::Component,
        Self::Area,
        Self::Tag,
        Self::Description,
        Self::Environment,
        Self::Browser,
        Self::Commit,
        Self::Branch,
        Self::Ci,
    ];

    /// Canonical name of this [`WellKnown`] kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TestId => "TestId",
            Self::Name => "Name",
            Self::Result => "Result",
            Self::Line => "Line",
            Self::Duration => "Duration",
            Self::ClassName => "ClassName",
            Self::Method => "Method",
            Self::Module => "Module",
            Self::Assembly => "Assembly",
            Self::SystemOut => "SystemOut",
            Self::SystemErr => "SystemErr",
            Self::FailureMessage => "FailureMessage",
            Self::CallStack => "CallStack",
            Self::FailureType => "FailureType",
            Self::CollectionName => "CollectionName",
            Self::Milestone => "Milestone",
            Self::Release => "Release",
            Self::Category => "Category",
            Self::TestCategory => "TestCategory",
            Self::Priority => "Priority",
            Self::Owner => "Owner",
            Self::Project => "Project",
            Self::Feature => "Feature",
            Self::Component => "Component",
            Self::Area => "Area",
            Self::Tag => "Tag",
            Self::Description => "Description",
            Self::Environment => "Environment",
            Self::Browser => "Browser",
            Self::Commit => "Commit",
            Self::Branch => "Branch",
            Self::Ci => "Ci",
        }
    }

    /// Looks up the [`WellKnown`] kind with the given canonical `name`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "TestId" => Self::TestId,
            "Name" => Self::Name,
            "Result" => Self::Result,
            "Line" => Self::Line,
            "Duration" => Self::Duration,
            "ClassName" => Self::ClassName,
            "Method" => Self::Method,
            "Module" => Self::Module,
            "Assembly" => Self::Assembly,
            "SystemOut" => Self::SystemOut,
            "SystemErr" => Self::SystemErr,
            "FailureMessage" => Self::FailureMessage,
            "CallStack" => Self::CallStack,
            "FailureType" => Self::FailureType,
            "CollectionName" => Self::CollectionName,
            "Milestone" => Self::Milestone,
            "Release" => Self::Release,
            "Category" => Self::Category,
            "TestCategory" => Self::TestCategory,
            "Priority" => Self::Priority,
            "Owner" => Self::Owner,
            "Project" => Self::Project,
            "Feature" => Self::Feature,
            "Component" => Self::Component,
            "Area" => Self::Area,
            "Tag" => Self::Tag,
            "Description" => Self::Description,
            "Environment" => Self::Environment,
            "Browser" => Self::Browser,
            "Commit" => Self::Commit,
            "Branch" => Self::Branch,
            "Ci" => Self::Ci,
            _ => return None,
        })
    }
}

impl fmt::Display for WellKnown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a [`Trait`]: either [`WellKnown`] or a custom one carrying its
/// own name.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraitKind {
    /// [`WellKnown`] kind, whose name is implied.
    #[display("{_0}")]
    WellKnown(WellKnown),

    /// Any other kind, named explicitly.
    #[display("{_0}")]
    Custom(String),
}

impl TraitKind {
    /// Classifies the given metadata `name`.
    ///
    /// Total over all strings: anything not in the [`WellKnown`] table becomes
    /// [`TraitKind::Custom`] retaining the `name` verbatim.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        WellKnown::from_name(name)
            .map_or_else(|| Self::Custom(name.to_owned()), Self::WellKnown)
    }

    /// Name of this [`TraitKind`].
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::WellKnown(kind) => kind.as_str(),
            Self::Custom(name) => name,
        }
    }

    /// Returns the [`WellKnown`] kind, if this is one.
    #[must_use]
    pub const fn well_known(&self) -> Option<WellKnown> {
        match self {
            Self::WellKnown(kind) => Some(*kind),
            Self::Custom(_) => None,
        }
    }
}

impl From<WellKnown> for TraitKind {
    fn from(kind: WellKnown) -> Self {
        Self::WellKnown(kind)
    }
}

/// Scope a [`Trait`] is exported with.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExportType {
    /// Written once, as a suite or run level value.
    #[default]
    Static,

    /// Written for every test instance.
    Instance,
}

/// Metadata value of a [`Run`], a [`Suite`] or a [`Case`].
///
/// [`Trait`]s are never deduplicated by kind: several [`TraitKind::Custom`]
/// ones with the same name may coexist to represent multi-valued fields.
///
/// [`Case`]: super::Case
/// [`Run`]: super::Run
/// [`Suite`]: super::Suite
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trait {
    /// [`TraitKind`] of this [`Trait`].
    pub kind: TraitKind,

    /// Value of this [`Trait`].
    pub value: String,

    /// [`ExportType`] of this [`Trait`].
    pub export: ExportType,
}

impl Trait {
    /// Creates a new [`ExportType::Static`] [`Trait`].
    #[must_use]
    pub fn new(kind: impl Into<TraitKind>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
            export: ExportType::Static,
        }
    }

    /// Creates a new [`ExportType::Static`] [`Trait`], classifying its `name`.
    #[must_use]
    pub fn named(name: &str, value: impl Into<String>) -> Self {
        Self::new(TraitKind::classify(name), value)
    }

    /// Sets the [`ExportType`] of this [`Trait`].
    #[must_use]
    pub const fn with_export(mut self, export: ExportType) -> Self {
        self.export = export;
        self
    }

    /// Name of this [`Trait`], see [`TraitKind::name()`].
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Indicates whether this [`Trait`] is of the given [`WellKnown`] kind.
    #[must_use]
    pub fn is(&self, kind: WellKnown) -> bool {
        self.kind.well_known() == Some(kind)
    }
}

/// Returns the value of the first [`Trait`] of the given [`WellKnown`] kind.
#[must_use]
pub fn find(traits: &[Trait], kind: WellKnown) -> Option<&str> {
    traits.iter().find(|t| t.is(kind)).map(|t| t.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_names() {
        assert_eq!(
            TraitKind::classify("Milestone"),
            TraitKind::WellKnown(WellKnown::Milestone),
        );
        assert_eq!(
            TraitKind::classify("Owner"),
            TraitKind::WellKnown(WellKnown::Owner),
        );
    }

    #[test]
    fn classification_is_case_sensitive() {
        assert_eq!(
            TraitKind::classify("milestone"),
            TraitKind::Custom("milestone".into()),
        );
    }

    #[test]
    fn unknown_names_are_custom() {
        let kind = TraitKind::classify("jira-ticket");

        assert_eq!(kind, TraitKind::Custom("jira-ticket".into()));
        assert_eq!(kind.name(), "jira-ticket");
        assert_eq!(kind.well_known(), None);
    }

    #[test]
    fn name_table_is_bijective() {
        for kind in WellKnown::ALL {
            assert_eq!(WellKnown::from_name(kind.as_str()), Some(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn custom_traits_with_same_name_coexist() {
        let traits = vec![
            Trait::named("browser-flag", "a"),
            Trait::named("browser-flag", "b"),
        ];

        assert_eq!(traits.len(), 2);
        assert_ne!(traits[0], traits[1]);
    }

    #[test]
    fn finds_first_value_of_kind() {
        let traits = vec![
            Trait::named("Owner", "alice"),
            Trait::new(WellKnown::Owner, "bob")
                .with_export(ExportType::Instance),
        ];

        assert_eq!(find(&traits, WellKnown::Owner), Some("alice"));
        assert_eq!(find(&traits, WellKnown::Release), None);
    }
}
