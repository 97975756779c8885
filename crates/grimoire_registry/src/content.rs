//! Concrete content kinds.
//!
//! These are the objects tokens refer to. The loading pipeline builds them
//! from data files; tests build them directly.

use grimoire_foundation::{Loadable, ObjectKind, SortKeyed, TagSet};

/// An object of kind `Self` that contributes objects of kind `T`.
///
/// Used for derived membership: a piece of equipment contributes the
/// proficiency needed to use it.
pub trait Derive<T: Loadable>: Loadable {
    /// Keys of the `T` objects this object contributes.
    fn derived_keys(&self) -> impl Iterator<Item = &str>;
}

/// Proficiency with a kind of shield.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShieldProf {
    key: String,
    tags: TagSet,
}

impl ShieldProf {
    /// Creates a shield proficiency with no tags.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            tags: TagSet::new(),
        }
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag);
        self
    }
}

impl Loadable for ShieldProf {
    const KIND: ObjectKind = ObjectKind::ShieldProf;

    fn key_name(&self) -> &str {
        &self.key
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }
}

impl SortKeyed for ShieldProf {
    fn sort_key(&self) -> &str {
        &self.key
    }
}

/// Proficiency with a kind of armor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArmorProf {
    key: String,
    tags: TagSet,
}

impl ArmorProf {
    /// Creates an armor proficiency with no tags.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            tags: TagSet::new(),
        }
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag);
        self
    }
}

impl Loadable for ArmorProf {
    const KIND: ObjectKind = ObjectKind::ArmorProf;

    fn key_name(&self) -> &str {
        &self.key
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }
}

impl SortKeyed for ArmorProf {
    fn sort_key(&self) -> &str {
        &self.key
    }
}

/// A piece of equipment.
///
/// Tags are the equipment types (`Shield`, `Heavy`, ...). Shield and armor
/// items name the proficiency required to use them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equipment {
    key: String,
    tags: TagSet,
    shield_prof: Option<String>,
    armor_prof: Option<String>,
}

impl Equipment {
    /// Creates an untyped piece of equipment.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            tags: TagSet::new(),
            shield_prof: None,
            armor_prof: None,
        }
    }

    /// Adds an equipment type.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Sets the shield proficiency required to use this item.
    #[must_use]
    pub fn with_shield_prof(mut self, prof: impl Into<String>) -> Self {
        self.shield_prof = Some(prof.into());
        self
    }

    /// Sets the armor proficiency required to use this item.
    #[must_use]
    pub fn with_armor_prof(mut self, prof: impl Into<String>) -> Self {
        self.armor_prof = Some(prof.into());
        self
    }

    /// The shield proficiency this item requires, if any.
    #[must_use]
    pub fn shield_prof(&self) -> Option<&str> {
        self.shield_prof.as_deref()
    }

    /// The armor proficiency this item requires, if any.
    #[must_use]
    pub fn armor_prof(&self) -> Option<&str> {
        self.armor_prof.as_deref()
    }
}

impl Loadable for Equipment {
    const KIND: ObjectKind = ObjectKind::Equipment;

    fn key_name(&self) -> &str {
        &self.key
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }
}

impl SortKeyed for Equipment {
    fn sort_key(&self) -> &str {
        &self.key
    }
}

impl Derive<ShieldProf> for Equipment {
    fn derived_keys(&self) -> impl Iterator<Item = &str> {
        self.shield_prof().into_iter()
    }
}

impl Derive<ArmorProf> for Equipment {
    fn derived_keys(&self) -> impl Iterator<Item = &str> {
        self.armor_prof().into_iter()
    }
}
