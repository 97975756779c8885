//! Entities that own list slots.

use std::collections::{BTreeMap, HashMap};

use grimoire_foundation::ObjectKind;

use crate::list::ListStore;

/// Anything that owns list slots.
pub trait HasLists {
    /// A name for diagnostics.
    fn label(&self) -> &str;

    /// The slots.
    fn lists(&self) -> &ListStore;

    /// The slots, mutably.
    fn lists_mut(&mut self) -> &mut ListStore;
}

/// A content definition (a feat, a class ability, ...) that tokens are
/// loaded onto.
#[derive(Clone, Debug, Default)]
pub struct Definition {
    key: String,
    lists: ListStore,
}

impl Definition {
    /// Creates an empty definition.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            lists: ListStore::new(),
        }
    }

    /// The definition's key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl HasLists for Definition {
    fn label(&self) -> &str {
        &self.key
    }

    fn lists(&self) -> &ListStore {
        &self.lists
    }

    fn lists_mut(&mut self) -> &mut ListStore {
        &mut self.lists
    }
}

/// One granted proficiency and how many active grants hold it.
#[derive(Clone, Debug)]
struct Held {
    name: String,
    grants: u32,
}

/// A character: receives effects and records which providers are granted.
///
/// Proficiencies are reference counted, so two providers granting the
/// same proficiency must both be revoked before it is lost.
#[derive(Clone, Debug, Default)]
pub struct Character {
    name: String,
    lists: ListStore,
    /// Kind -> lowercased key -> holding.
    proficiencies: HashMap<ObjectKind, BTreeMap<String, Held>>,
}

impl Character {
    /// Creates a character with nothing granted.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The character's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds one grant of a proficiency.
    pub fn add_proficiency(&mut self, kind: ObjectKind, name: &str) {
        self.proficiencies
            .entry(kind)
            .or_default()
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| Held {
                name: name.to_string(),
                grants: 0,
            })
            .grants += 1;
    }

    /// Removes one grant of a proficiency.
    ///
    /// Returns false if the character did not hold it.
    pub fn remove_proficiency(&mut self, kind: ObjectKind, name: &str) -> bool {
        let Some(held) = self.proficiencies.get_mut(&kind) else {
            return false;
        };
        let key = name.to_ascii_lowercase();
        let Some(entry) = held.get_mut(&key) else {
            return false;
        };
        entry.grants -= 1;
        if entry.grants == 0 {
            held.remove(&key);
        }
        true
    }

    /// Returns true if the character holds the proficiency.
    #[must_use]
    pub fn has_proficiency(&self, kind: ObjectKind, name: &str) -> bool {
        self.grant_count(kind, name) > 0
    }

    /// Number of active grants holding the proficiency.
    #[must_use]
    pub fn grant_count(&self, kind: ObjectKind, name: &str) -> u32 {
        self.proficiencies
            .get(&kind)
            .and_then(|held| held.get(&name.to_ascii_lowercase()))
            .map_or(0, |h| h.grants)
    }

    /// Held proficiencies of a kind, ordered by lowercased key.
    #[must_use]
    pub fn proficiencies(&self, kind: ObjectKind) -> Vec<&str> {
        self.proficiencies
            .get(&kind)
            .map(|held| held.values().map(|h| h.name.as_str()).collect())
            .unwrap_or_default()
    }
}

impl HasLists for Character {
    fn label(&self) -> &str {
        &self.name
    }

    fn lists(&self) -> &ListStore {
        &self.lists
    }

    fn lists_mut(&mut self) -> &mut ListStore {
        &mut self.lists
    }
}
