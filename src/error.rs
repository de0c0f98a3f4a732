// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of report (de)serialization.

use derive_more::with_trait::Display;

/// Error of serializing or deserializing a test report.
#[derive(Debug, Display, derive_more::with_trait::Error)]
pub enum Error {
    /// Input isn't a well-formed XML document.
    #[display("malformed XML document: {_0}")]
    Parse(roxmltree::Error),

    /// Document root isn't the one the dialect expects.
    #[display("unexpected root element `<{found}>`, expected {expected}")]
    UnexpectedRoot {
        /// Name of the found root element.
        #[error(not(source))]
        found: String,

        /// Human-readable list of the expected root elements.
        expected: &'static str,
    },

    /// Nested `<testsuite>` elements go deeper than allowed.
    #[display("`<testsuite>` nesting exceeds {limit} levels")]
    NestingTooDeep {
        /// Configured maximum depth.
        #[error(not(source))]
        limit: usize,
    },

    /// Text isn't a `data:<mime>;base64,<payload>` URI.
    #[display("invalid data URI: {reason}")]
    InvalidDataUri {
        /// What exactly is wrong.
        #[error(not(source))]
        reason: &'static str,
    },

    /// Payload isn't valid base64.
    #[display("invalid base64 payload: {_0}")]
    Base64(base64::DecodeError),

    /// Emitting XML failed.
    #[display("failed to write XML: {_0}")]
    Write(#[error(not(source))] String),
}

/// Result type alias using the crate [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an [`Error::Write`] out of any displayable failure.
    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        Self::Write(err.to_string())
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err)
    }
}
