//! Object kinds and the contract for registrable content.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tags::TagSet;

/// The closed set of content kinds a reference can target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    /// Shield proficiency.
    ShieldProf,
    /// Armor proficiency.
    ArmorProf,
    /// A piece of equipment.
    Equipment,
}

impl ObjectKind {
    /// Returns the display name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShieldProf => "ShieldProf",
            Self::ArmorProf => "ArmorProf",
            Self::Equipment => "Equipment",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An object that can be sorted by a string key.
pub trait SortKeyed {
    /// Returns the string this object is sorted by.
    fn sort_key(&self) -> &str;
}

/// A content object that can live in the reference registry.
///
/// Keys are unique per kind, compared ASCII case-insensitively.
pub trait Loadable: fmt::Debug + Send + Sync + 'static {
    /// The kind every instance of this type belongs to.
    const KIND: ObjectKind;

    /// The unique key of this object within its kind.
    fn key_name(&self) -> &str;

    /// Classification tags carried by this object.
    fn tags(&self) -> &TagSet;
}
