// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! XML plumbing shared by the dialect codecs: [`roxmltree`] lookups on the
//! reading side and a thin [`quick_xml::Writer`] wrapper on the writing side.

use std::{
    borrow::Cow,
    fmt,
    time::{Duration, SystemTime},
};

use quick_xml::{
    escape::escape,
    events::{BytesCData, BytesDecl, BytesStart, BytesText, Event},
};
use roxmltree::Node;

use crate::{Error, Result};

/// Iterates over the child elements of `node` with the given local `name`.
pub(crate) fn elements<'a, 'i>(
    node: Node<'a, 'i>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Returns the first child element of `node` with the given local `name`.
pub(crate) fn child<'a, 'i>(
    node: Node<'a, 'i>,
    name: &'a str,
) -> Option<Node<'a, 'i>> {
    elements(node, name).next()
}

/// Returns the owned value of the `name` attribute.
pub(crate) fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(ToOwned::to_owned)
}

/// Concatenates the direct text (and CDATA) content of `node`, if any.
pub(crate) fn text(node: Node<'_, '_>) -> Option<String> {
    let text = node
        .children()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect::<String>();
    (!text.is_empty()).then_some(text)
}

/// Returns the text of the first child element with the given local `name`.
pub(crate) fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).and_then(text)
}

/// Parses a culture-invariant decimal number of seconds.
///
/// Malformed, negative or non-finite values yield [`None`].
pub(crate) fn parse_seconds(value: &str) -> Option<Duration> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
    if parsed.is_none() {
        tracing::debug!(value, "ignoring malformed duration");
    }
    parsed
}

/// Formats a [`Duration`] as a decimal number of seconds.
pub(crate) fn format_seconds(duration: Duration) -> String {
    duration.as_secs_f64().to_string()
}

/// Invariant culture date-time format written by xUnit.net v2.
const INVARIANT_TIMESTAMP: &str = "%m/%d/%Y %H:%M:%S";

/// Parses an [RFC 3339]-like timestamp, tolerating a space instead of `T`
/// and a missing `Z`, or an invariant culture `MM/dd/yyyy HH:mm:ss` one.
///
/// Timestamps without an offset are read as UTC.
///
/// [RFC 3339]: https://www.rfc-editor.org/rfc/rfc3339
pub(crate) fn parse_timestamp(value: &str) -> Option<SystemTime> {
    let trimmed = value.trim();
    humantime::parse_rfc3339_weak(trimmed)
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(trimmed, INVARIANT_TIMESTAMP)
                .inspect_err(|e| {
                    tracing::debug!(
                        value,
                        error = %e,
                        "ignoring malformed timestamp",
                    );
                })
                .ok()
                .map(|dt| SystemTime::from(dt.and_utc()))
        })
}

/// Formats a [`SystemTime`] as an [RFC 3339] timestamp with seconds
/// precision.
///
/// [RFC 3339]: https://www.rfc-editor.org/rfc/rfc3339
pub(crate) fn format_timestamp(time: SystemTime) -> String {
    humantime::format_rfc3339_seconds(time).to_string()
}

/// Replaces characters not allowed in an XML 1.0 document with `U+FFFD`.
fn legal_xml(text: &str) -> Cow<'_, str> {
    fn is_legal(c: char) -> bool {
        matches!(
            c,
            '\t' | '\n' | '\r'
                | '\u{20}'..='\u{D7FF}'
                | '\u{E000}'..='\u{FFFD}'
                | '\u{10000}'..='\u{10FFFF}',
        )
    }

    if text.chars().all(is_legal) {
        Cow::Borrowed(text)
    } else {
        tracing::debug!("replacing characters not allowed in XML");
        Cow::Owned(
            text.chars()
                .map(|c| if is_legal(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

/// Start tag being built for an [`XmlWriter`].
#[derive(Debug)]
pub(crate) struct Element<'a>(BytesStart<'a>);

impl<'a> Element<'a> {
    /// Creates a new [`Element`] without attributes.
    pub(crate) fn new(name: &'a str) -> Self {
        Self(BytesStart::new(name))
    }

    /// Adds an attribute, escaping its `value`.
    ///
    /// Line breaks and tabs are written as character references, as parsers
    /// normalize literal ones into spaces.
    pub(crate) fn attr(mut self, key: &str, value: impl fmt::Display) -> Self {
        let raw = value.to_string();
        let value = escape(legal_xml(&raw).as_ref())
            .replace('\n', "&#10;")
            .replace('\r', "&#13;")
            .replace('\t', "&#9;");
        self.0.push_attribute((key.as_bytes(), value.as_bytes()));
        self
    }

    /// Adds an attribute only if the `value` is present.
    pub(crate) fn attr_opt(
        self,
        key: &str,
        value: Option<impl fmt::Display>,
    ) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }
}

/// Indenting XML writer collecting a whole document in memory.
pub(crate) struct XmlWriter(quick_xml::Writer<Vec<u8>>);

impl XmlWriter {
    /// Creates a new [`XmlWriter`] and writes the XML declaration.
    pub(crate) fn new() -> Result<Self> {
        let mut writer =
            Self(quick_xml::Writer::new_with_indent(Vec::new(), b' ', 2));
        writer.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(writer)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.0.write_event(event).map_err(Error::write)
    }

    /// Writes the `el` element with the content written by `body`.
    pub(crate) fn element(
        &mut self,
        el: Element<'_>,
        body: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<()> {
        let end = el.0.to_end().into_owned();
        self.event(Event::Start(el.0))?;
        body(self)?;
        self.event(Event::End(end))
    }

    /// Writes the `el` element without content.
    pub(crate) fn empty(&mut self, el: Element<'_>) -> Result<()> {
        self.event(Event::Empty(el.0))
    }

    /// Writes the `el` element with an escaped `text` content.
    pub(crate) fn text_element(&mut self, el: Element<'_>, text: &str) -> Result<()> {
        self.element(el, |w| {
            w.event(Event::Text(BytesText::new(&legal_xml(text))))
        })
    }

    /// Writes the `el` element with a verbatim `text` content wrapped into
    /// CDATA sections.
    pub(crate) fn cdata_element(&mut self, el: Element<'_>, text: &str) -> Result<()> {
        self.element(el, |w| w.cdata(text))
    }

    fn cdata(&mut self, text: &str) -> Result<()> {
        // `]]>` terminates a section, so it's split across two of them.
        let text = legal_xml(text);
        let mut rest = text.as_ref();
        while let Some(pos) = rest.find("]]>") {
            self.event(Event::CData(BytesCData::new(&rest[..pos + 2])))?;
            rest = &rest[pos + 2..];
        }
        self.event(Event::CData(BytesCData::new(rest)))
    }

    /// Returns the written document.
    pub(crate) fn finish(self) -> Result<String> {
        String::from_utf8(self.0.into_inner()).map_err(Error::write)
    }
}
