// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fallback values an importer derives for data missing from a report.

use uuid::Uuid;

/// Provider of the fallback values used when a report omits them.
pub trait ImportDefaults {
    /// Derives an external identifier of a test case lacking one.
    ///
    /// Must be deterministic, so re-importing the same report yields the same
    /// identifiers.
    fn test_id(&self, run: Option<&str>, suite: &str, case: &str) -> String;
}

impl<F> ImportDefaults for F
where
    F: Fn(Option<&str>, &str, &str) -> String,
{
    fn test_id(&self, run: Option<&str>, suite: &str, case: &str) -> String {
        self(run, suite, case)
    }
}

/// [`ImportDefaults`] deriving identifiers as name-based [UUIDv5][1]s.
///
/// [1]: https://www.rfc-editor.org/rfc/rfc9562#name-uuid-version-5
#[derive(Clone, Copy, Debug, Default)]
pub struct DerivedIds;

impl ImportDefaults for DerivedIds {
    fn test_id(&self, run: Option<&str>, suite: &str, case: &str) -> String {
        let key = format!("{}\u{1f}{suite}\u{1f}{case}", run.unwrap_or_default());
        Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
    }
}
