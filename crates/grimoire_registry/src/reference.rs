//! Symbolic references to content objects.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use grimoire_foundation::{Loadable, ObjectKind, TagSet};

/// What a reference denotes, independent of the target kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Exactly one object, by key.
    Single(String),
    /// Every object of the kind, now or later.
    GroupAll,
    /// Every object of the kind carrying all of these tags.
    GroupByTag(TagSet),
}

/// A symbolic reference to objects of kind `T`.
///
/// Identity is the description itself. A reference holds no objects;
/// resolution happens in [`ReferenceRegistry::query_members`].
///
/// [`ReferenceRegistry::query_members`]: crate::ReferenceRegistry::query_members
pub struct Reference<T> {
    selector: Selector,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Reference<T> {
    /// Creates a reference to the single object named `name`.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self::from_selector(Selector::Single(name.into()))
    }

    /// Creates a reference to every object of the kind.
    #[must_use]
    pub fn all() -> Self {
        Self::from_selector(Selector::GroupAll)
    }

    /// Creates a reference to every object carrying all of `tags`.
    #[must_use]
    pub fn by_tag(tags: TagSet) -> Self {
        Self::from_selector(Selector::GroupByTag(tags))
    }

    /// Wraps a selector.
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            _kind: PhantomData,
        }
    }

    /// Returns what this reference denotes.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Returns the referenced name if this is a single reference.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.selector {
            Selector::Single(name) => Some(name),
            Selector::GroupAll | Selector::GroupByTag(_) => None,
        }
    }

    /// Returns true for group references (wildcard or tag filtered).
    #[must_use]
    pub fn is_group(&self) -> bool {
        !matches!(self.selector, Selector::Single(_))
    }
}

impl<T: Loadable> Reference<T> {
    /// The kind this reference targets.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        T::KIND
    }

    /// Returns true if `object` is denoted by this reference.
    #[must_use]
    pub fn matches(&self, object: &T) -> bool {
        match &self.selector {
            Selector::Single(name) => object.key_name().eq_ignore_ascii_case(name),
            Selector::GroupAll => true,
            Selector::GroupByTag(tags) => object.tags().contains_all(tags),
        }
    }
}

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        Self::from_selector(self.selector.clone())
    }
}

impl<T> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.selector == other.selector
    }
}

impl<T> Eq for Reference<T> {}

impl<T> Hash for Reference<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.selector.hash(state);
    }
}

impl<T> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selector {
            Selector::Single(name) => write!(f, "Single({name})"),
            Selector::GroupAll => f.write_str("GroupAll"),
            Selector::GroupByTag(tags) => write!(f, "GroupByTag({tags})"),
        }
    }
}
