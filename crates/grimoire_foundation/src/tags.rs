//! Classification tag sets.
//!
//! Tags keep the author's spelling and iterate in ascending lexicographic
//! order, which is also their canonical text order. Membership tests ignore
//! ASCII case.

use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered set of classification tags.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a tag. Returns false if the exact spelling was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if any tag equals `tag`, ignoring ASCII case.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Returns true if every tag in `filter` is present here.
    ///
    /// An empty filter matches everything.
    #[must_use]
    pub fn contains_all(&self, filter: &TagSet) -> bool {
        filter.iter().all(|t| self.contains(t))
    }

    /// Iterates tags in ascending lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Joins the tags in canonical order with `separator`.
    #[must_use]
    pub fn join(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(tag);
        }
        out
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join('.'))
    }
}
