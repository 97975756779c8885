//! Providers: the unit stored in a list slot.
//!
//! A provider describes a dynamic set of `T` objects:
//! - `direct_refs` name `T` objects directly
//! - `derived_from_refs` name `U` objects, each contributing the `T` objects
//!   it derives (see [`Derive`])
//!
//! The set is computed at query time. Nothing is cached, so objects
//! registered after the provider was built are included by later queries.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use grimoire_foundation::{Loadable, ObjectKind};
use grimoire_registry::{ArmorProf, Derive, Equipment, Reference, ReferenceRegistry, ShieldProf};

use crate::prerequisite::PrerequisiteGuard;

/// Grants shield proficiencies directly or through equipment types.
pub type ShieldProfProvider = Provider<ShieldProf, Equipment>;

/// Grants armor proficiencies directly or through equipment types.
pub type ArmorProfProvider = Provider<ArmorProf, Equipment>;

/// An immutable aggregate of references to `T` and to `U` objects that derive `T`.
pub struct Provider<T, U> {
    direct_refs: Vec<Reference<T>>,
    derived_from_refs: Vec<Reference<U>>,
    prerequisite: Option<PrerequisiteGuard>,
}

impl<T, U> Provider<T, U> {
    /// Builds a provider. No deduplication happens here.
    ///
    /// Both lists may be empty; such a provider contributes nothing.
    #[must_use]
    pub fn build(direct_refs: Vec<Reference<T>>, derived_from_refs: Vec<Reference<U>>) -> Self {
        Self {
            direct_refs,
            derived_from_refs,
            prerequisite: None,
        }
    }

    /// Attaches a prerequisite guard.
    #[must_use]
    pub fn with_prerequisite(mut self, guard: PrerequisiteGuard) -> Self {
        self.prerequisite = Some(guard);
        self
    }

    /// Returns a copy of this provider with the prerequisite detached.
    #[must_use]
    pub fn without_prerequisite(&self) -> Self {
        Self {
            direct_refs: self.direct_refs.clone(),
            derived_from_refs: self.derived_from_refs.clone(),
            prerequisite: None,
        }
    }

    /// References to `T` objects, in parse order.
    #[must_use]
    pub fn direct_refs(&self) -> &[Reference<T>] {
        &self.direct_refs
    }

    /// References to `U` objects whose derived `T` objects are included.
    #[must_use]
    pub fn derived_from_refs(&self) -> &[Reference<U>] {
        &self.derived_from_refs
    }

    /// The attached prerequisite guard, if any.
    #[must_use]
    pub fn prerequisite(&self) -> Option<&PrerequisiteGuard> {
        self.prerequisite.as_ref()
    }

    /// Returns true if the provider has no references at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.direct_refs.is_empty() && self.derived_from_refs.is_empty()
    }
}

impl<T: Loadable, U: Derive<T>> Provider<T, U> {
    /// Computes the objects this provider currently denotes.
    ///
    /// Direct references come first, then derived ones, each in reference
    /// order. An object reached twice is kept at its first position.
    /// References matching nothing are not an error.
    #[must_use]
    pub fn members(&self, registry: &ReferenceRegistry) -> Vec<Arc<T>> {
        let mut seen = HashSet::new();
        let mut members = Vec::new();

        for reference in &self.direct_refs {
            for object in registry.query_members(reference) {
                if seen.insert(object.key_name().to_ascii_lowercase()) {
                    members.push(object);
                }
            }
        }

        for reference in &self.derived_from_refs {
            for source in registry.query_members(reference) {
                for key in <U as Derive<T>>::derived_keys(&source) {
                    let Some(object) = registry.get::<T>(key) else {
                        continue;
                    };
                    if seen.insert(object.key_name().to_ascii_lowercase()) {
                        members.push(object);
                    }
                }
            }
        }

        members
    }

    /// Single references (direct or derived) that currently name nothing.
    #[must_use]
    pub fn unresolved(&self, registry: &ReferenceRegistry) -> Vec<(ObjectKind, String)> {
        let direct = self
            .direct_refs
            .iter()
            .filter(|r| registry.is_unresolved(*r))
            .filter_map(|r| r.name().map(|n| (T::KIND, n.to_string())));
        let derived = self
            .derived_from_refs
            .iter()
            .filter(|r| registry.is_unresolved(*r))
            .filter_map(|r| r.name().map(|n| (U::KIND, n.to_string())));
        direct.chain(derived).collect()
    }
}

impl<T, U> Clone for Provider<T, U> {
    fn clone(&self) -> Self {
        Self {
            direct_refs: self.direct_refs.clone(),
            derived_from_refs: self.derived_from_refs.clone(),
            prerequisite: self.prerequisite.clone(),
        }
    }
}

/// Equality compares both reference lists as ordered sequences.
///
/// `[A, B]` and `[B, A]` are different providers. The prerequisite guard is
/// not part of equality.
impl<T, U> PartialEq for Provider<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.direct_refs == other.direct_refs && self.derived_from_refs == other.derived_from_refs
    }
}

impl<T, U> Eq for Provider<T, U> {}

impl<T, U> fmt::Debug for Provider<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("direct_refs", &self.direct_refs)
            .field("derived_from_refs", &self.derived_from_refs)
            .field("prerequisite", &self.prerequisite)
            .finish()
    }
}
