// SPDX-License-Identifier: Apache-2.0

use alloc::collections::BTreeSet;
use alloc::string::String;

/// Record fields retained when no allow-list is given.
///
/// `"uuid "` carries a trailing space, so a plain `"uuid"` key is not
/// retained by the default filter.
pub const DEFAULT_FIELDS: [&str; 9] = [
    "authors",
    "last_modified",
    "lpath",
    "series",
    "series_index",
    "size",
    "tags",
    "title",
    "uuid ",
];

/// The allow-list of record field names.
///
/// Matching is exact and case-sensitive. The set is fixed once built and can
/// be shared between concurrent decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    fields: BTreeSet<String>,
}

impl FieldFilter {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the record field `key` is wanted.
    pub fn test(&self, key: &str) -> bool {
        self.fields.contains(key)
    }

    /// Number of names in the allow-list.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

impl Default for FieldFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FIELDS)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
