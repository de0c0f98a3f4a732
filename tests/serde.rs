// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![cfg(feature = "serde")]

use std::time::{Duration, UNIX_EPOCH};

use testreport::{
    Attachment, Case, ExportType, ResultStatus, Run, Suite, Trait, WellKnown,
};

#[test]
fn model_round_trips_through_json() {
    let case = Case::new("t")
        .with_result(ResultStatus::Crashed)
        .with_duration(Duration::from_millis(1500))
        .with_trait(Trait::named("ticket", "T-1"))
        .with_trait(
            Trait::new(WellKnown::Browser, "firefox")
                .with_export(ExportType::Instance),
        )
        .with_attachment(Attachment::new("log.txt", "text/plain", "log"));
    let mut run = Run::new().with_suite(Suite::new("s").with_case(case));
    run.created = Some(UNIX_EPOCH + Duration::from_secs(1_700_000_000));

    let json = serde_json::to_string(&run).unwrap();
    let back = serde_json::from_str::<Run>(&json).unwrap();

    assert_eq!(back, run);
}
