// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serialization of JUnit-style reports.

use std::time::Duration;

use crate::{
    Dialect, Result, attachment,
    model::{Attachment, Case, ResultStatus, Run, Suite, Trait, TraitKind},
    xml::{self, Element, XmlWriter},
};

use super::{ATTACHMENT_PREFIX, TRAIT_PREFIX, result_element};

/// Writes the given [`Run`] as a JUnit-style report.
pub(super) fn write_run(run: &Run) -> Result<String> {
    tracing::debug!(
        suites = run.suites.len(),
        cases = run.total(),
        "writing JUnit report",
    );

    let mut w = XmlWriter::new()?;
    let root = Element::new("testsuites")
        .attr("tests", run.total())
        .attr("passed", run.passed())
        .attr("failures", run.failed())
        .attr_opt("name", run.name.as_deref())
        .attr_opt("id", run.external_id.as_deref())
        .attr_opt("timestamp", run.created.map(xml::format_timestamp))
        .attr("time", xml::format_seconds(run.duration()));
    w.element(root, |w| {
        write_properties(w, &run.traits, &run.attachments)?;
        run.suites.iter().try_for_each(|s| write_suite(w, s))
    })?;
    w.finish()
}

/// Per-status tallies of a `<testsuite>` and all its nested ones.
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    tests: usize,
    passed: usize,
    failures: usize,
    assertions: usize,
    errors: usize,
    time: Duration,
}

impl Tally {
    fn of<'c>(cases: impl IntoIterator<Item = &'c Case>) -> Self {
        cases.into_iter().fold(Self::default(), |mut tally, case| {
            tally.tests += 1;
            match case.result {
                ResultStatus::Passed => tally.passed += 1,
                ResultStatus::Failed => tally.failures += 1,
                ResultStatus::Assert => tally.assertions += 1,
                ResultStatus::Error | ResultStatus::Crashed => {
                    tally.errors += 1;
                }
                ResultStatus::Skipped
                | ResultStatus::Blocked
                | ResultStatus::NoRun => {}
            }
            if let Some(d) = case.duration {
                tally.time += d;
            }
            tally
        })
    }

    fn counters<'a>(&self, el: Element<'a>) -> Element<'a> {
        el.attr("tests", self.tests)
            .attr("passed", self.passed)
            .attr("failures", self.failures)
            .attr("assertions", self.assertions)
            .attr("errors", self.errors)
    }
}

/// [`Case`]s of a [`Suite`] grouped by their [`Case::folders`].
///
/// Every group becomes a nested `<testsuite>` named after its parent joined
/// with its own segment, so reading the report back crops it to the segment.
#[derive(Debug)]
struct Group<'r> {
    segment: &'r str,
    name: String,
    cases: Vec<&'r Case>,
    children: Vec<Group<'r>>,
}

impl<'r> Group<'r> {
    const fn new(segment: &'r str, name: String) -> Self {
        Self {
            segment,
            name,
            cases: Vec::new(),
            children: Vec::new(),
        }
    }

    fn of(suite: &'r Suite) -> Self {
        let mut root = Self::new("", suite.name.clone());
        for case in &suite.cases {
            let mut group = &mut root;
            for segment in &case.folders {
                let pos = group
                    .children
                    .iter()
                    .position(|g| g.segment == segment.as_str());
                let pos = pos.unwrap_or_else(|| {
                    let name = if group.name.is_empty() {
                        segment.clone()
                    } else {
                        format!("{}.{segment}", group.name)
                    };
                    group.children.push(Group::new(segment, name));
                    group.children.len() - 1
                });
                group = &mut group.children[pos];
            }
            group.cases.push(case);
        }
        root
    }

    fn all_cases(&self) -> Vec<&'r Case> {
        let mut cases = self.cases.clone();
        for child in &self.children {
            cases.extend(child.all_cases());
        }
        cases
    }
}

fn write_suite(w: &mut XmlWriter, suite: &Suite) -> Result<()> {
    let group = Group::of(suite);
    let tally = Tally::of(&suite.cases);
    let el = tally
        .counters(Element::new("testsuite"))
        .attr("name", &suite.name)
        .attr_opt("id", suite.external_id.as_deref())
        .attr("time", xml::format_seconds(tally.time));
    w.element(el, |w| {
        write_properties(w, &suite.traits, &suite.attachments)?;
        write_group(w, &group)?;
        if let Some(out) = &suite.system_out {
            w.text_element(Element::new("system-out"), out)?;
        }
        if let Some(err) = &suite.system_err {
            w.text_element(Element::new("system-err"), err)?;
        }
        Ok(())
    })
}

/// Writes the [`Case`]s of the `group`, followed by its subgroups as nested
/// `<testsuite>`s.
fn write_group(w: &mut XmlWriter, group: &Group<'_>) -> Result<()> {
    group.cases.iter().try_for_each(|c| write_case(w, c))?;
    for child in &group.children {
        let tally = Tally::of(child.all_cases());
        let el = tally
            .counters(Element::new("testsuite"))
            .attr("name", &child.name)
            .attr("time", xml::format_seconds(tally.time));
        w.element(el, |w| write_group(w, child))?;
    }
    Ok(())
}

fn write_case(w: &mut XmlWriter, case: &Case) -> Result<()> {
    let el = Element::new("testcase")
        .attr("name", &case.name)
        .attr_opt("id", case.external_id.as_deref())
        .attr_opt("classname", case.class_name.as_deref())
        .attr_opt("time", case.duration.map(xml::format_seconds));
    w.element(el, |w| {
        write_properties(w, &case.traits, &case.attachments)?;
        if let Some(marker) = result_element(case.result) {
            let el = Element::new(marker)
                .attr_opt("message", case.message.as_deref())
                .attr_opt("type", case.failure_type.as_deref());
            match &case.call_stack {
                Some(stack) => w.text_element(el, stack)?,
                None => w.empty(el)?,
            }
        }
        if let Some(out) = &case.system_out {
            w.text_element(Element::new("system-out"), out)?;
        }
        if let Some(err) = &case.system_err {
            w.text_element(Element::new("system-err"), err)?;
        }
        Ok(())
    })
}

/// Writes a `<properties>` block of the non-native `traits` followed by the
/// `attachments` encoded as data URIs, unless there is nothing to write.
fn write_properties(
    w: &mut XmlWriter,
    traits: &[Trait],
    attachments: &[Attachment],
) -> Result<()> {
    let properties = traits
        .iter()
        .filter(|t| !Dialect::JUnit.is_native(&t.kind))
        .map(|t| (property_name(&t.kind), t.value.clone()))
        .chain(attachments.iter().map(|a| {
            (
                format!("{ATTACHMENT_PREFIX}{}", a.name),
                attachment::encode_data_uri(a),
            )
        }))
        .collect::<Vec<_>>();
    if properties.is_empty() {
        return Ok(());
    }

    w.element(Element::new("properties"), |w| {
        properties.iter().try_for_each(|(name, value)| {
            w.empty(
                Element::new("property")
                    .attr("name", name)
                    .attr("value", value),
            )
        })
    })
}

/// Name of the `<property>` representing a [`Trait`] of the given `kind`.
///
/// Custom names clashing with a reserved prefix get escaped with `trait:`,
/// which reading strips back.
fn property_name(kind: &TraitKind) -> String {
    match kind {
        TraitKind::Custom(name)
            if name.starts_with(ATTACHMENT_PREFIX)
                || name.starts_with(TRAIT_PREFIX) =>
        {
            format!("{TRAIT_PREFIX}{name}")
        }
        kind => kind.name().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use crate::model::{ExportType, WellKnown};

    use super::*;

    fn suite_of(cases: impl IntoIterator<Item = Case>) -> Run {
        let mut suite = Suite::new("Tests.Registration");
        suite.cases.extend(cases);
        Run::new().with_suite(suite)
    }

    fn in_folders(mut case: Case, folders: &[&str]) -> Case {
        case.folders = folders.iter().map(|&f| f.to_owned()).collect();
        case
    }

    #[test]
    fn writes_root_counters() {
        let run = suite_of([
            Case::new("a").with_duration(Duration::from_secs(1)),
            Case::new("b")
                .with_result(ResultStatus::Failed)
                .with_duration(Duration::from_millis(500)),
            Case::new("c").with_result(ResultStatus::Crashed),
        ]);

        let out = write_run(&run).unwrap();
        let doc = Document::parse(&out).unwrap();
        let root = doc.root_element();

        assert_eq!(root.tag_name().name(), "testsuites");
        assert_eq!(root.attribute("tests"), Some("3"));
        assert_eq!(root.attribute("passed"), Some("1"));
        assert_eq!(root.attribute("failures"), Some("2"));
        assert_eq!(root.attribute("time"), Some("1.5"));

        let suite = xml::child(root, "testsuite").unwrap();
        assert_eq!(suite.attribute("failures"), Some("1"));
        assert_eq!(suite.attribute("errors"), Some("1"));
    }

    #[test]
    fn writes_result_elements() {
        let mut failed = Case::new("f").with_result(ResultStatus::Failed);
        failed.message = Some("boom".into());
        failed.failure_type = Some("AssertionError".into());
        failed.call_stack = Some("at x()".into());
        let run = suite_of([
            failed,
            Case::new("s").with_result(ResultStatus::Skipped),
            Case::new("p"),
        ]);

        let out = write_run(&run).unwrap();
        let doc = Document::parse(&out).unwrap();
        let cases = doc
            .descendants()
            .filter(|n| n.has_tag_name("testcase"))
            .collect::<Vec<_>>();

        let failure = xml::child(cases[0], "failure").unwrap();
        assert_eq!(failure.attribute("message"), Some("boom"));
        assert_eq!(failure.attribute("type"), Some("AssertionError"));
        assert_eq!(failure.text(), Some("at x()"));
        assert!(xml::child(cases[1], "skipped").is_some());
        assert_eq!(cases[2].children().filter(|n| n.is_element()).count(), 0);
        assert_eq!(cases[2].attribute("time"), None);
    }

    #[test]
    fn groups_cases_by_folders() {
        let run = suite_of([
            Case::new("top"),
            in_folders(Case::new("one"), &["Email"]),
            in_folders(Case::new("two"), &["Email", "Invalid"]),
            in_folders(
                Case::new("three").with_result(ResultStatus::Failed),
                &["Email"],
            ),
        ]);

        let out = write_run(&run).unwrap();
        let doc = Document::parse(&out).unwrap();
        let suite = xml::child(doc.root_element(), "testsuite").unwrap();
        assert_eq!(xml::elements(suite, "testcase").count(), 1);

        let email = xml::child(suite, "testsuite").unwrap();
        assert_eq!(email.attribute("name"), Some("Tests.Registration.Email"));
        assert_eq!(email.attribute("tests"), Some("3"));
        assert_eq!(email.attribute("failures"), Some("1"));
        assert_eq!(xml::elements(email, "testcase").count(), 2);

        let invalid = xml::child(email, "testsuite").unwrap();
        assert_eq!(
            invalid.attribute("name"),
            Some("Tests.Registration.Email.Invalid"),
        );
    }

    #[test]
    fn skips_native_traits_and_escapes_reserved_names() {
        let case = Case::new("t")
            .with_trait(Trait::new(WellKnown::ClassName, "Foo"))
            .with_trait(Trait::new(WellKnown::Owner, "alice"))
            .with_trait(Trait::named("attachment:notes", "plain"))
            .with_trait(
                Trait::named("flag", "on").with_export(ExportType::Instance),
            )
            .with_attachment(Attachment::new("log.txt", "text/plain", "hi"));
        let run = suite_of([case]);

        let out = write_run(&run).unwrap();
        let doc = Document::parse(&out).unwrap();
        let props = doc
            .descendants()
            .filter(|n| n.has_tag_name("property"))
            .map(|n| (n.attribute("name").unwrap(), n.attribute("value").unwrap()))
            .collect::<Vec<_>>();

        assert_eq!(
            props,
            [
                ("Owner", "alice"),
                ("trait:attachment:notes", "plain"),
                ("flag", "on"),
                ("attachment:log.txt", "data:text/plain;base64,aGk="),
            ],
        );
    }

    #[test]
    fn omits_empty_properties() {
        let out = write_run(&suite_of([Case::new("t")])).unwrap();

        assert!(!out.contains("<properties"));
    }
}
