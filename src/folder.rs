// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reconstruction of [`Case::folders`] from nested suite names.
//!
//! Tools nesting JUnit `<testsuite>` elements usually name the children with
//! namespace-style names extending their parent's one, like
//! `Tests.Registration` containing `Tests.Registration.Email`. The
//! [`FolderStack`] crops such a parent prefix, so the folder becomes just
//! `Email`.
//!
//! [`Case::folders`]: crate::Case::folders

use crate::{Error, Result};

/// Default maximum number of nested suites a [`FolderStack`] accepts.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Returns the folder segment for a `child` suite nested into a `parent` one.
///
/// The `parent` name is cropped only when it's a non-empty literal prefix of
/// the `child` name followed by a separator character (anything but an
/// alphanumeric or an underscore). Otherwise, or if nothing would remain
/// after cropping, the full `child` name is returned.
#[must_use]
pub fn crop<'c>(parent: &str, child: &'c str) -> &'c str {
    if parent.is_empty() || child.len() <= parent.len() {
        return child;
    }
    child
        .strip_prefix(parent)
        .and_then(|rest| {
            let mut chars = rest.chars();
            let sep = chars.next()?;
            (!sep.is_alphanumeric() && sep != '_').then_some(chars.as_str())
        })
        .filter(|rest| !rest.is_empty())
        .unwrap_or(child)
}

/// Stack of folder segments maintained while walking nested suites
/// depth-first.
#[derive(Clone, Debug)]
pub struct FolderStack {
    /// Current segments, outermost first.
    segments: Vec<String>,

    /// Maximum number of segments.
    limit: usize,
}

impl Default for FolderStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl FolderStack {
    /// Creates a new empty [`FolderStack`] accepting at most `limit` nested
    /// suites.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            segments: Vec::new(),
            limit,
        }
    }

    /// Enters the `child` suite nested into the `parent` one.
    ///
    /// # Errors
    ///
    /// With [`Error::NestingTooDeep`] if the limit is already reached.
    pub fn push(&mut self, parent: &str, child: &str) -> Result<()> {
        if self.segments.len() >= self.limit {
            return Err(Error::NestingTooDeep { limit: self.limit });
        }
        self.segments.push(crop(parent, child).to_owned());
        Ok(())
    }

    /// Leaves the innermost suite.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// Current number of nested suites.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Folder path of a [`Case`] visited right now.
    ///
    /// [`Case`]: crate::Case
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.segments.clone()
    }
}
