// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binary payloads attached to a test report.

/// File attached to a [`Run`], a [`Suite`] or a [`Case`].
///
/// [`Case`]: super::Case
/// [`Run`]: super::Run
/// [`Suite`]: super::Suite
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// Name of this [`Attachment`], usually a file name.
    pub name: String,

    /// MIME type of the [`Attachment::payload`].
    pub content_type: String,

    /// Raw bytes of this [`Attachment`].
    pub payload: Vec<u8>,
}

impl Attachment {
    /// Creates a new [`Attachment`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            payload: payload.into(),
        }
    }
}
