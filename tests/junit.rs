// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::time::{Duration, UNIX_EPOCH};

use testreport::{
    Attachment, Case, Codec as _, Dialect, Error, JUnit, ResultStatus, Run,
    Suite, Trait, TraitKind, WellKnown, junit,
};

const NESTED: &str = include_str!("fixtures/junit_nested.xml");

fn case(name: &str, result: ResultStatus, folders: &[&str]) -> Case {
    let mut case = Case::new(name)
        .with_result(result)
        .with_duration(Duration::from_millis(500));
    case.external_id = Some(format!("id-{name}"));
    case.class_name = Some("Tests.Registration".into());
    case.method = Some(name.into());
    case.folders = folders.iter().map(|&f| f.to_owned()).collect();
    // `<assert>` carries no details.
    if !matches!(result, ResultStatus::Passed | ResultStatus::Assert) {
        case.message = Some(format!("{name} did not pass"));
        case.failure_type = Some("AssertionError".into());
        case.call_stack = Some(format!("at {name}()\nat main()"));
    }
    case
}

fn sample() -> Run {
    let mut suite = Suite::new("Tests.Registration")
        .with_trait(Trait::new(WellKnown::Owner, "platform-team"));
    suite.external_id = Some("suite-1".into());
    suite.system_out = Some("suite finished".into());
    suite.system_err = Some("1 warning".into());
    suite
        .attachments
        .push(Attachment::new("suite.log", "text/plain", "suite log"));

    let mut failing = case("rejects_invalid", ResultStatus::Failed, &["Email"])
        .with_trait(Trait::named("ticket", "REG-101"))
        .with_trait(Trait::named("ticket", "REG-102"))
        .with_trait(Trait::named("trait:escaped", "kept"))
        .with_attachment(Attachment::new(
            "screenshot.png",
            "image/png",
            vec![0x89_u8, 0x50, 0x4e, 0x47],
        ));
    failing.system_out = Some("submitting <form> & waiting".into());
    failing.system_err = Some("console error".into());

    suite.cases = vec![
        case("opens_form", ResultStatus::Passed, &[]),
        failing,
        case("accepts_plus", ResultStatus::Skipped, &["Email"]),
        case("blocks_disposable", ResultStatus::Blocked, &["Email", "Domains"]),
        case("renders", ResultStatus::Crashed, &["Smoke"]),
        case("loads", ResultStatus::Error, &["Smoke"]),
        case("asserts", ResultStatus::Assert, &["Smoke"]),
    ];

    let mut run = Run::new()
        .with_suite(suite)
        .with_suite(Suite::new("Empty"));
    run.name = Some("nightly".into());
    run.external_id = Some("run-42".into());
    run.created = Some(UNIX_EPOCH + Duration::from_secs(1_700_000_000));
    run.traits = vec![
        Trait::new(WellKnown::Commit, "9f1c2e7"),
        Trait::named("pipeline", "ci"),
    ];
    run.attachments
        .push(Attachment::new("run.log", "text/plain; charset=utf-8", "ok"));
    run
}

#[test]
fn reads_nested_report() {
    let run = JUnit::new().deserialize(NESTED).unwrap();

    assert_eq!(run.name.as_deref(), Some("nightly"));
    assert_eq!(run.external_id.as_deref(), Some("run-42"));
    assert!(run.created.is_some());
    assert_eq!(
        run.traits,
        [
            Trait::new(WellKnown::Commit, "9f1c2e7"),
            Trait::new(WellKnown::Branch, "main"),
        ],
    );
    assert_eq!(run.total(), 5);
    assert_eq!(run.passed(), 2);
    assert_eq!(run.failed(), 2);

    let suite = &run.suites[0];
    assert_eq!(run.suites.len(), 1);
    assert_eq!(suite.external_id.as_deref(), Some("suite-1"));
    assert_eq!(suite.system_out.as_deref(), Some("registration suite finished"));
    assert_eq!(suite.traits, [Trait::new(WellKnown::Owner, "platform-team")]);

    let folders = suite
        .cases
        .iter()
        .map(|c| (c.name.as_str(), c.folders.join("/")))
        .collect::<Vec<_>>();
    assert_eq!(
        folders,
        [
            ("opens_form", String::new()),
            ("accepts_valid", "Email".into()),
            ("rejects_invalid", "Email".into()),
            ("blocks_disposable", "Email/Domains".into()),
            ("renders", "Smoke".into()),
        ],
    );

    let accepts = &suite.cases[1];
    assert_eq!(accepts.trait_value(WellKnown::Priority), Some("high"));
    let tickets = accepts
        .traits
        .iter()
        .filter(|t| t.kind == TraitKind::Custom("ticket".into()))
        .map(|t| t.value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(tickets, ["REG-101", "REG-102"]);

    let rejects = &suite.cases[2];
    assert_eq!(rejects.result, ResultStatus::Failed);
    assert_eq!(rejects.duration, Some(Duration::from_millis(1500)));
    assert_eq!(rejects.failure_type.as_deref(), Some("AssertionError"));
    assert_eq!(rejects.message.as_deref(), Some("expected rejection"));
    assert_eq!(
        rejects.call_stack.as_deref(),
        Some("at Email.rejects_invalid (email.spec.js:42:7)"),
    );
    assert_eq!(rejects.system_out.as_deref(), Some("submitting form"));
    assert_eq!(
        rejects.attachments,
        [Attachment::new(
            "screenshot.png",
            "image/png",
            b"\x89PNG\r\n\x1a\n".to_vec(),
        )],
    );

    let blocks = &suite.cases[3];
    assert_eq!(blocks.result, ResultStatus::Skipped);
    assert_eq!(blocks.message.as_deref(), Some("waiting on provider list"));
    assert_eq!(blocks.call_stack, None);
    assert!(blocks.external_id.is_some());

    let renders = &suite.cases[4];
    assert_eq!(renders.result, ResultStatus::Error);
    assert_eq!(renders.failure_type.as_deref(), Some("TimeoutError"));
    assert_eq!(renders.system_err.as_deref(), Some("net::ERR_TIMED_OUT"));
}

#[test]
fn derived_ids_are_stable_across_imports() {
    let first = JUnit::new().deserialize(NESTED).unwrap();
    let second = JUnit::new().deserialize(NESTED).unwrap();

    assert_eq!(
        first.suites[0].cases[3].external_id,
        second.suites[0].cases[3].external_id,
    );
}

#[test]
fn round_trips() {
    let codec = JUnit::new();
    let run = sample();

    let xml = codec.serialize(&run).unwrap();
    let back = codec.deserialize(&xml).unwrap();

    assert_eq!(back, run);
}

#[test]
fn reserialization_is_stable() {
    let codec = JUnit::new();

    let once = codec.serialize(&sample()).unwrap();
    let twice = codec
        .serialize(&codec.deserialize(&once).unwrap())
        .unwrap();

    assert_eq!(once, twice);
}

#[test]
fn control_characters_dont_break_document() {
    let codec = JUnit::new();
    let mut failing =
        Case::new("prints_colors").with_result(ResultStatus::Failed);
    failing.system_out = Some("\u{1b}[32mok\u{1b}[0m".into());
    failing.message = Some("bell\u{7}".into());
    let run = Run::new().with_suite(Suite::new("S").with_case(failing));

    let back = codec.deserialize(&codec.serialize(&run).unwrap()).unwrap();

    let case = &back.suites[0].cases[0];
    assert_eq!(case.system_out.as_deref(), Some("\u{fffd}[32mok\u{fffd}[0m"));
    assert_eq!(case.message.as_deref(), Some("bell\u{fffd}"));
}

#[test]
fn no_run_reads_back_as_passed() {
    let codec = JUnit::new();
    let run = Run::new().with_suite(
        Suite::new("S")
            .with_case(Case::new("t").with_result(ResultStatus::NoRun)),
    );

    let back = codec.deserialize(&codec.serialize(&run).unwrap()).unwrap();

    assert_eq!(back.suites[0].cases[0].result, ResultStatus::Passed);
}

#[test]
fn decomposes_xunit_collection_names() {
    let xml = r#"<testsuites>
        <testsuite name="Test collection for Shop.Tests.CartTests (id: 0a1b)">
            <testcase name="AddsItem"/>
        </testsuite>
    </testsuites>"#;
    let codec = JUnit::new().with_cli(junit::Cli {
        process_xunit_collection_name: true,
        ..junit::Cli::default()
    });

    let run = codec.deserialize(xml).unwrap();

    assert_eq!(run.suites[0].name, "Shop.Tests.CartTests");
    assert_eq!(run.suites[0].external_id.as_deref(), Some("0a1b"));
}

#[test]
fn fails_on_malformed_input() {
    let codec = JUnit::new();

    assert!(matches!(codec.deserialize("not xml"), Err(Error::Parse(_))));
    assert!(matches!(
        codec.deserialize("<assemblies/>"),
        Err(Error::UnexpectedRoot { .. }),
    ));
}

#[test]
fn detected_codec_reads_report() {
    let dialect = Dialect::detect(NESTED).unwrap();

    assert_eq!(dialect, Dialect::JUnit);
    let run = dialect.codec().deserialize(NESTED).unwrap();
    assert_eq!(run.total(), 5);
}
