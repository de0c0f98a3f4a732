// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serialization of xUnit.net-style reports.

use crate::{
    Dialect, Result, attachment,
    model::{Case, ExportType, ResultStatus, Run, Suite, Trait},
    xml::{self, Element, XmlWriter},
};

use super::{result_to_xunit, writes_failure};

/// Writes the given [`Run`] as an xUnit.net-style report.
///
/// [`Run`] and [`Suite`] attachments have no representation in the dialect,
/// so are omitted.
pub(super) fn write_run(run: &Run) -> Result<String> {
    tracing::debug!(
        suites = run.suites.len(),
        cases = run.total(),
        "writing xUnit report",
    );

    let mut w = XmlWriter::new()?;
    let root = Element::new("assemblies")
        .attr_opt("timestamp", run.created.map(xml::format_timestamp))
        .attr_opt("id", run.external_id.as_deref())
        .attr_opt("name", run.name.as_deref());
    w.element(root, |w| {
        write_traits(w, non_native(&run.traits).collect())?;
        run.suites.iter().try_for_each(|s| write_assembly(w, s))
    })?;
    w.finish()
}

/// [`Trait`]s not represented structurally by the dialect.
fn non_native(traits: &[Trait]) -> impl Iterator<Item = &Trait> {
    traits.iter().filter(|t| !Dialect::XUnit.is_native(&t.kind))
}

fn write_assembly(w: &mut XmlWriter, suite: &Suite) -> Result<()> {
    let time = xml::format_seconds(suite.duration());
    let assembly = Element::new("assembly")
        .attr("name", suite.module_or_name())
        .attr_opt("id", suite.external_id.as_deref())
        .attr("total", suite.total())
        .attr("passed", suite.passed())
        .attr("failed", suite.failed())
        .attr("time", &time);
    w.element(assembly, |w| {
        let collection = Element::new("collection")
            .attr("total", suite.total())
            .attr("passed", suite.passed())
            .attr("failed", suite.failed())
            .attr("time", &time)
            .attr("name", &suite.name)
            .attr_opt("id", suite.external_id.as_deref());
        w.element(collection, |w| {
            write_traits(w, non_native(&suite.traits).collect())?;
            suite.cases.iter().try_for_each(|c| write_test(w, c))
        })
    })
}

fn write_test(w: &mut XmlWriter, case: &Case) -> Result<()> {
    let el = Element::new("test")
        .attr("name", &case.name)
        .attr_opt("id", case.external_id.as_deref())
        .attr_opt("method", case.method.as_deref())
        .attr_opt("type", case.class_name.as_deref())
        .attr_opt("time", case.duration.map(xml::format_seconds))
        .attr("result", result_to_xunit(case.result));
    w.element(el, |w| {
        if let Some(out) = &case.system_out {
            w.cdata_element(Element::new("output"), out)?;
        }

        let (statics, instances): (Vec<_>, Vec<_>) = non_native(&case.traits)
            .partition(|t| t.export == ExportType::Static);
        write_traits(w, statics)?;
        if !instances.is_empty() || !case.attachments.is_empty() {
            w.element(Element::new("attachments"), |w| {
                for tr in &instances {
                    let el = Element::new("attachment").attr("name", tr.name());
                    w.cdata_element(el, &tr.value)?;
                }
                for file in &case.attachments {
                    let el = Element::new("attachment")
                        .attr("name", &file.name)
                        .attr("media-type", &file.content_type);
                    w.text_element(el, &attachment::encode_base64(&file.payload))?;
                }
                Ok(())
            })?;
        }

        if writes_failure(case.result) {
            let el = Element::new("failure")
                .attr_opt("exception-type", case.failure_type.as_deref())
                .attr_opt("failure-type", case.failure_type.as_deref());
            w.element(el, |w| {
                if let Some(message) = &case.message {
                    w.cdata_element(Element::new("message"), message)?;
                }
                if let Some(stack) = &case.call_stack {
                    w.cdata_element(Element::new("stack-trace"), stack)?;
                }
                Ok(())
            })?;
        } else if case.result == ResultStatus::Skipped {
            if let Some(reason) = &case.message {
                w.cdata_element(Element::new("reason"), reason)?;
            }
        }
        Ok(())
    })
}

/// Writes a `<traits>` block, unless there are no `traits`.
fn write_traits(w: &mut XmlWriter, traits: Vec<&Trait>) -> Result<()> {
    if traits.is_empty() {
        return Ok(());
    }
    w.element(Element::new("traits"), |w| {
        traits.iter().try_for_each(|tr| {
            w.empty(
                Element::new("trait")
                    .attr("name", tr.name())
                    .attr("value", &tr.value),
            )
        })
    })
}
