// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Deserialization of JUnit-style reports.

use roxmltree::{Document, Node};

use crate::{
    Error, Result, attachment,
    defaults::ImportDefaults,
    folder::FolderStack,
    model::{Attachment, Case, ResultStatus, Run, Suite, Trait, WellKnown},
    xml,
};

use super::{ATTACHMENT_PREFIX, Cli, TRAIT_PREFIX, decompose_collection_name};

/// Root elements a JUnit-style report may start with.
const EXPECTED_ROOTS: &str = "`<testsuites>` or `<testsuite>`";

/// Result marker elements of a `<testcase>`, in decreasing precedence.
const RESULT_MARKERS: [(&str, ResultStatus); 6] = [
    ("skipped", ResultStatus::Skipped),
    ("blocked", ResultStatus::Blocked),
    ("failure", ResultStatus::Failed),
    ("error", ResultStatus::Error),
    ("crashed", ResultStatus::Crashed),
    ("assert", ResultStatus::Assert),
];

/// Elements of a `<testcase>` carrying its failure details, in lookup order.
const DETAIL_ELEMENTS: [&str; 6] =
    ["failure", "blocked", "skipped", "error", "passed", "crashed"];

/// State shared by the whole deserialization of a single report.
struct Context<'c, D> {
    /// Options of the deserialization.
    cli: &'c Cli,

    /// Fallbacks for data missing in the report.
    defaults: &'c D,

    /// Name of the [`Run`] being read.
    run_name: Option<String>,
}

/// Reads a [`Run`] out of a JUnit-style report `text`.
pub(super) fn read_run<D: ImportDefaults>(
    text: &str,
    cli: &Cli,
    defaults: &D,
) -> Result<Run> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    let mut run = Run::new();
    let mut ctx = Context {
        cli,
        defaults,
        run_name: None,
    };
    run.created = root
        .attribute("timestamp")
        .and_then(xml::parse_timestamp);

    match root.tag_name().name() {
        "testsuites" => {
            run.name = xml::attr(root, "name");
            run.external_id = xml::attr(root, "id");
            read_properties(root, &mut run.traits, &mut run.attachments);

            ctx.run_name.clone_from(&run.name);
            for node in xml::elements(root, "testsuite") {
                run.suites.push(read_suite(node, &ctx)?);
            }
        }
        "testsuite" => {
            ctx.run_name = xml::attr(root, "name");
            let suite = read_suite(root, &ctx)?;
            run.name = Some(suite.name.clone());
            run.external_id.clone_from(&suite.external_id);
            run.suites.push(suite);
        }
        other => {
            return Err(Error::UnexpectedRoot {
                found: other.to_owned(),
                expected: EXPECTED_ROOTS,
            });
        }
    }

    propagate_assembly(&mut run);
    tracing::debug!(
        suites = run.suites.len(),
        cases = run.total(),
        "read JUnit report",
    );
    Ok(run)
}

fn read_suite<D: ImportDefaults>(
    node: Node<'_, '_>,
    ctx: &Context<'_, D>,
) -> Result<Suite> {
    let mut suite = Suite::new(node.attribute("name").unwrap_or_default());
    suite.external_id = xml::attr(node, "id");
    if ctx.cli.process_xunit_collection_name {
        if let Some((name, id)) = decompose_collection_name(&suite.name)
            .map(|(name, id)| (name.to_owned(), id.to_owned()))
        {
            suite.name = name;
            _ = suite.external_id.get_or_insert(id);
        }
    }
    suite.system_out = xml::child_text(node, "system-out");
    suite.system_err = xml::child_text(node, "system-err");

    let mut folders = FolderStack::new(ctx.cli.max_depth);
    read_suite_content(node, &mut folders, &mut suite, ctx)?;
    tracing::trace!(
        suite = %suite.name,
        cases = suite.cases.len(),
        "read JUnit suite",
    );
    Ok(suite)
}

/// Reads the `<testcase>`s of the given suite `node` and, depth-first, of its
/// nested `<testsuite>`s into the `suite`.
fn read_suite_content<D: ImportDefaults>(
    node: Node<'_, '_>,
    folders: &mut FolderStack,
    suite: &mut Suite,
    ctx: &Context<'_, D>,
) -> Result<()> {
    read_properties(node, &mut suite.traits, &mut suite.attachments);

    let parent = node.attribute("name").unwrap_or_default();
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "testcase" => {
                let case = read_case(child, folders, &suite.name, ctx);
                suite.cases.push(case);
            }
            "testsuite" => {
                folders.push(parent, child.attribute("name").unwrap_or_default())?;
                read_suite_content(child, folders, suite, ctx)?;
                folders.pop();
            }
            _ => {}
        }
    }
    Ok(())
}

fn read_case<D: ImportDefaults>(
    node: Node<'_, '_>,
    folders: &FolderStack,
    suite: &str,
    ctx: &Context<'_, D>,
) -> Case {
    let mut case = Case::new(node.attribute("name").unwrap_or_default());
    case.class_name = xml::attr(node, "classname");
    case.external_id = Some(xml::attr(node, "id").unwrap_or_else(|| {
        ctx.defaults
            .test_id(ctx.run_name.as_deref(), suite, &case.name)
    }));
    case.method =
        Some(xml::attr(node, "method").unwrap_or_else(|| case.name.clone()));
    case.duration = node.attribute("time").and_then(xml::parse_seconds);

    case.result = RESULT_MARKERS
        .into_iter()
        .find(|&(marker, _)| xml::child(node, marker).is_some())
        .map_or(ResultStatus::Passed, |(_, status)| status);
    if let Some(detail) =
        DETAIL_ELEMENTS.into_iter().find_map(|el| xml::child(node, el))
    {
        case.failure_type = xml::attr(detail, "type");
        case.message = xml::attr(detail, "message");
        case.call_stack = xml::text(detail).filter(|t| !t.trim().is_empty());
    }

    case.system_out = xml::child_text(node, "system-out");
    case.system_err = xml::child_text(node, "system-err");
    case.folders = folders.snapshot();
    read_properties(node, &mut case.traits, &mut case.attachments);
    case
}

/// Reads `<properties><property name=".." value=".."/></properties>` of the
/// given `node` into `traits` and `attachments`.
///
/// Undecodable `attachment:` properties are dropped rather than failing the
/// whole report.
fn read_properties(
    node: Node<'_, '_>,
    traits: &mut Vec<Trait>,
    attachments: &mut Vec<Attachment>,
) {
    let properties = xml::elements(node, "properties")
        .flat_map(|props| xml::elements(props, "property"));
    for property in properties {
        let Some(name) = property.attribute("name") else {
            continue;
        };
        let value = xml::attr(property, "value")
            .or_else(|| xml::text(property))
            .unwrap_or_default();

        if let Some(file) = name.strip_prefix(ATTACHMENT_PREFIX) {
            if value.starts_with("data:") {
                match attachment::decode_data_uri(file, &value) {
                    Ok(decoded) => attachments.push(decoded),
                    Err(e) => tracing::warn!(
                        attachment = file,
                        error = %e,
                        "dropping undecodable attachment",
                    ),
                }
                continue;
            }
        }

        let name = name
            .strip_prefix(ATTACHMENT_PREFIX)
            .or_else(|| name.strip_prefix(TRAIT_PREFIX))
            .unwrap_or(name);
        traits.push(Trait::named(name, value));
    }
}

/// Propagates explicit case-level `Assembly` traits upwards, and otherwise
/// lets cases inherit the module of their suite or run.
fn propagate_assembly(run: &mut Run) {
    let Run { module: run_module, suites, .. } = run;
    for suite in suites {
        for case in &mut suite.cases {
            if let Some(assembly) = case.trait_value(WellKnown::Assembly) {
                let assembly = assembly.to_owned();
                suite.module = Some(assembly.clone());
                *run_module = Some(assembly.clone());
                case.module = Some(assembly);
            } else {
                case.module =
                    suite.module.clone().or_else(|| run_module.clone());
            }
        }
    }
}
