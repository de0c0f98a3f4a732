// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`base64`] encoding of [`Attachment`] payloads.
//!
//! JUnit-style reports carry attachments as `data:<mime>;base64,<payload>`
//! URIs inside `<property>` values, while xUnit.net-style reports store the
//! plain [`base64`] payload as an element body next to a `media-type`
//! attribute.

use base64::Engine as _;

use crate::{Error, Result, model::Attachment};

/// Used [`base64::engine`].
const ENGINE: base64::engine::GeneralPurpose =
    base64::engine::general_purpose::STANDARD;

/// Scheme prefix of a data URI.
const DATA_SCHEME: &str = "data:";

/// Encoding marker of a data URI, preceding the payload separator.
const BASE64_MARKER: &str = ";base64";

/// Encodes `bytes` as [`base64`].
#[must_use]
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    ENGINE.encode(bytes)
}

/// Decodes [`base64`] `text`, ignoring any ASCII whitespace in it.
///
/// # Errors
///
/// If `text` isn't valid [`base64`].
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let compact = text.split_ascii_whitespace().collect::<String>();
    Ok(ENGINE.decode(compact)?)
}

/// Encodes the given [`Attachment`] as a `data:{mime};base64,{payload}` URI.
#[must_use]
pub fn encode_data_uri(attachment: &Attachment) -> String {
    format!(
        "{DATA_SCHEME}{}{BASE64_MARKER},{}",
        attachment.content_type,
        encode_base64(&attachment.payload),
    )
}

/// Decodes a `data:{mime};base64,{payload}` URI into an [`Attachment`] with
/// the given `name`.
///
/// An empty MIME type decodes as `application/octet-stream`.
///
/// # Errors
///
/// - If `text` doesn't begin with `data:`.
/// - If `text` has no `;base64,` payload.
/// - If the payload isn't valid [`base64`].
pub fn decode_data_uri(name: impl Into<String>, text: &str) -> Result<Attachment> {
    let rest = text.trim().strip_prefix(DATA_SCHEME).ok_or(
        Error::InvalidDataUri {
            reason: "missing `data:` scheme",
        },
    )?;
    let (header, payload) =
        rest.split_once(',').ok_or(Error::InvalidDataUri {
            reason: "missing `,` payload separator",
        })?;
    let content_type = header.strip_suffix(BASE64_MARKER).ok_or(
        Error::InvalidDataUri {
            reason: "payload isn't `;base64` encoded",
        },
    )?;
    let content_type = if content_type.is_empty() {
        mime::APPLICATION_OCTET_STREAM.to_string()
    } else {
        content_type.to_owned()
    };

    Ok(Attachment::new(name, content_type, decode_base64(payload)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_data_uri() {
        let attachment = Attachment::new("log.txt", "text/plain", "test");

        assert_eq!(encode_data_uri(&attachment), "data:text/plain;base64,dGVzdA==");
    }

    #[test]
    fn decodes_data_uri() {
        let attachment =
            decode_data_uri("shot.png", "data:image/png;base64,AAEC").unwrap();

        assert_eq!(attachment.name, "shot.png");
        assert_eq!(attachment.content_type, "image/png");
        assert_eq!(attachment.payload, [0, 1, 2]);
    }

    #[test]
    fn keeps_mime_parameters() {
        let attachment =
            decode_data_uri("a", "data:text/plain;charset=utf-8;base64,dGVzdA==")
                .unwrap();

        assert_eq!(attachment.content_type, "text/plain;charset=utf-8");
        assert_eq!(attachment.payload, b"test");
    }

    #[test]
    fn empty_mime_defaults_to_octet_stream() {
        let attachment = decode_data_uri("blob", "data:;base64,AA==").unwrap();

        assert_eq!(attachment.content_type, "application/octet-stream");
    }

    #[test]
    fn rejects_missing_scheme() {
        let err = decode_data_uri("a", "text/plain;base64,AA==").unwrap_err();

        assert!(matches!(err, Error::InvalidDataUri { .. }));
    }

    #[test]
    fn rejects_non_base64_uri() {
        let err = decode_data_uri("a", "data:text/plain,hello").unwrap_err();

        assert!(matches!(err, Error::InvalidDataUri { .. }));
    }

    #[test]
    fn rejects_corrupted_payload() {
        let err = decode_data_uri("a", "data:text/plain;base64,@@@").unwrap_err();

        assert!(matches!(err, Error::Base64(_)));
    }

    #[test]
    fn plain_base64_ignores_whitespace() {
        assert_eq!(decode_base64("dGVz\n  dA==\n").unwrap(), b"test");
        assert_eq!(encode_base64(b"test"), "dGVzdA==");
        assert!(decode_base64("not base64!").is_err());
    }
}
