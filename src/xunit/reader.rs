// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Deserialization of xUnit.net-style reports.

use roxmltree::{Document, Node};

use crate::{
    Error, Result, attachment,
    defaults::ImportDefaults,
    model::{Attachment, Case, ExportType, ResultStatus, Run, Suite, Trait, WellKnown},
    xml,
};

use super::result_from_xunit;

/// Root elements an xUnit.net-style report may start with.
const EXPECTED_ROOTS: &str = "`<assemblies>` or `<assembly>`";

/// Reads a [`Run`] out of an xUnit.net-style report `text`.
pub(super) fn read_run<D: ImportDefaults>(text: &str, defaults: &D) -> Result<Run> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    let mut run = Run::new();
    run.created = root
        .attribute("timestamp")
        .and_then(xml::parse_timestamp);

    match root.tag_name().name() {
        "assemblies" => {
            run.external_id = xml::attr(root, "id");
            run.name = xml::attr(root, "name");
            read_traits(root, &mut run.traits);
            for node in xml::elements(root, "assembly") {
                let suite = read_assembly(node, run.name.as_deref(), defaults);
                run.suites.push(suite);
            }
        }
        "assembly" => {
            let suite = read_assembly(root, None, defaults);
            run.name = Some(suite.name.clone());
            run.suites.push(suite);
        }
        other => {
            return Err(Error::UnexpectedRoot {
                found: other.to_owned(),
                expected: EXPECTED_ROOTS,
            });
        }
    }

    propagate_categories(&mut run);
    tracing::debug!(
        suites = run.suites.len(),
        cases = run.total(),
        "read xUnit report",
    );
    Ok(run)
}

/// Last non-empty segment of an assembly `path`.
fn module_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).find(|s| !s.is_empty()).unwrap_or_default()
}

fn read_assembly<D: ImportDefaults>(
    node: Node<'_, '_>,
    run_name: Option<&str>,
    defaults: &D,
) -> Suite {
    let name = module_name(node.attribute("name").unwrap_or_default());
    let mut suite = Suite::new(name);
    suite.module = Some(name.to_owned());
    suite.external_id = xml::attr(node, "id").or_else(|| {
        xml::child(node, "collection").and_then(|c| xml::attr(c, "id"))
    });

    for collection in xml::elements(node, "collection") {
        read_traits(collection, &mut suite.traits);
        let collection_name = collection.attribute("name");
        for test in xml::elements(collection, "test") {
            let mut case = read_test(test, run_name, &suite.name, defaults);
            case.module.clone_from(&suite.module);
            if let Some(name) = collection_name {
                if case.trait_value(WellKnown::CollectionName).is_none() {
                    case.traits.push(
                        Trait::new(WellKnown::CollectionName, name)
                            .with_export(ExportType::Instance),
                    );
                }
            }
            suite.cases.push(case);
        }
    }
    tracing::trace!(
        suite = %suite.name,
        cases = suite.cases.len(),
        "read xUnit assembly",
    );
    suite
}

fn read_test<D: ImportDefaults>(
    node: Node<'_, '_>,
    run_name: Option<&str>,
    suite: &str,
    defaults: &D,
) -> Case {
    let mut case = Case::new(node.attribute("name").unwrap_or_default());
    case.class_name = xml::attr(node, "type");
    case.method = xml::attr(node, "method");
    case.external_id = Some(
        xml::attr(node, "id")
            .unwrap_or_else(|| defaults.test_id(run_name, suite, &case.name)),
    );
    case.result = node
        .attribute("result")
        .map_or(ResultStatus::Skipped, result_from_xunit);
    case.duration = node.attribute("time").and_then(xml::parse_seconds);
    case.system_out = xml::child_text(node, "output");

    if let Some(failure) = xml::child(node, "failure") {
        case.failure_type = xml::attr(failure, "exception-type")
            .or_else(|| xml::attr(failure, "failure-type"));
        case.message = xml::child_text(failure, "message");
        case.call_stack = xml::child_text(failure, "stack-trace");
    }
    if case.message.is_none() {
        case.message = xml::child_text(node, "reason");
    }

    read_traits(node, &mut case.traits);
    read_attachments(node, &mut case);
    case
}

/// Reads `<traits><trait name=".." value=".."/></traits>` of the given `node`
/// as [`ExportType::Static`] [`Trait`]s.
fn read_traits(node: Node<'_, '_>, traits: &mut Vec<Trait>) {
    let nodes =
        xml::elements(node, "traits").flat_map(|ts| xml::elements(ts, "trait"));
    for tr in nodes {
        let Some(name) = tr.attribute("name") else {
            continue;
        };
        let value = xml::attr(tr, "value")
            .or_else(|| xml::text(tr))
            .unwrap_or_default();
        traits.push(Trait::named(name, value));
    }
}

/// Reads `<attachments>` of a `<test>` into the `case`.
///
/// Ones with a `media-type` are base64-encoded files, and are dropped if
/// undecodable. The rest are [`ExportType::Instance`] [`Trait`]s.
fn read_attachments(node: Node<'_, '_>, case: &mut Case) {
    let nodes = xml::elements(node, "attachments")
        .flat_map(|a| xml::elements(a, "attachment"));
    for el in nodes {
        let name = el.attribute("name").unwrap_or_default();
        let body = xml::text(el).unwrap_or_default();
        match el.attribute("media-type") {
            Some(media_type) => match attachment::decode_base64(&body) {
                Ok(payload) => case
                    .attachments
                    .push(Attachment::new(name, media_type, payload)),
                Err(e) => tracing::warn!(
                    test = %case.name,
                    attachment = name,
                    error = %e,
                    "dropping undecodable attachment",
                ),
            },
            None => case.traits.push(
                Trait::named(name, body).with_export(ExportType::Instance),
            ),
        }
    }
}

/// Fills the `project` and `category` of every [`Suite`] and of the [`Run`]
/// from the first [`Case`] carrying them, without overwriting.
fn propagate_categories(run: &mut Run) {
    let Run {
        project,
        category,
        suites,
        ..
    } = run;
    for suite in suites {
        for case in &suite.cases {
            if suite.project.is_none() {
                suite.project = case
                    .trait_value(WellKnown::Project)
                    .map(ToOwned::to_owned);
            }
            if suite.category.is_none() {
                suite.category = case
                    .trait_value(WellKnown::TestCategory)
                    .map(ToOwned::to_owned);
            }
        }
        if project.is_none() {
            project.clone_from(&suite.project);
        }
        if category.is_none() {
            category.clone_from(&suite.category);
        }
    }
}
