//! Effect actors.
//!
//! An effect actor applies the game-mechanical consequence of a provider
//! being granted to a character, and reverses it on revocation. Actors see
//! slot values type erased and check the type themselves, so a foreign
//! value surfaces as `SlotTypeMismatch` at apply time.
//!
//! `remove` re-queries membership against the registry as it is at remove
//! time. If the registry changed since `apply`, removal targets what the
//! provider denotes now, not what it denoted when it was applied.

use std::any::Any;

use grimoire_foundation::{Error, Loadable, Result};
use grimoire_registry::{Derive, ReferenceRegistry};
use tracing::{debug, error};

use crate::entity::Character;
use crate::list::{ListKey, ListKeyId, SlotValue};
use crate::prerequisite::PrerequisiteGuard;
use crate::provider::Provider;

/// Applies and reverses the effect of one provider family.
pub trait EffectActor: Send + Sync {
    /// The slot whose values this actor understands.
    fn list_key(&self) -> ListKeyId;

    /// The prerequisite guard attached to `value`.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` if `value` is not this actor's provider type.
    fn prerequisite<'a>(&self, value: &'a SlotValue) -> Result<Option<&'a PrerequisiteGuard>>;

    /// Applies the effect of a granted provider.
    ///
    /// All lookups happen before the character is touched.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` if `value` is not this actor's provider type.
    fn apply(
        &self,
        value: &SlotValue,
        character: &mut Character,
        registry: &ReferenceRegistry,
    ) -> Result<()>;

    /// Reverses the effect of a revoked provider.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` if `value` is not this actor's provider type.
    fn remove(
        &self,
        value: &SlotValue,
        character: &mut Character,
        registry: &ReferenceRegistry,
    ) -> Result<()>;
}

/// Grants every member of a `Provider<T, U>` as a proficiency of kind `T`.
pub struct ProficiencyActor<T, U> {
    key: ListKey<Provider<T, U>>,
}

impl<T, U> ProficiencyActor<T, U> {
    /// Creates an actor for the providers stored under `key`.
    #[must_use]
    pub const fn new(key: ListKey<Provider<T, U>>) -> Self {
        Self { key }
    }
}

impl<T: Loadable, U: Derive<T>> ProficiencyActor<T, U> {
    fn typed<'a>(&self, value: &'a SlotValue) -> Result<&'a Provider<T, U>> {
        let value: &'a (dyn Any + Send + Sync) = &**value;
        value.downcast_ref::<Provider<T, U>>().ok_or_else(|| {
            error!(slot = %self.key.id(), expected = self.key.element(), "actor given a foreign value");
            Error::slot_type_mismatch(self.key.id().name(), self.key.element())
        })
    }
}

impl<T: Loadable, U: Derive<T>> EffectActor for ProficiencyActor<T, U> {
    fn list_key(&self) -> ListKeyId {
        self.key.id()
    }

    fn prerequisite<'a>(&self, value: &'a SlotValue) -> Result<Option<&'a PrerequisiteGuard>> {
        Ok(self.typed(value)?.prerequisite())
    }

    fn apply(
        &self,
        value: &SlotValue,
        character: &mut Character,
        registry: &ReferenceRegistry,
    ) -> Result<()> {
        let members = self.typed(value)?.members(registry);
        debug!(
            character = character.name(),
            kind = %T::KIND,
            count = members.len(),
            "applying proficiencies"
        );
        for member in &members {
            character.add_proficiency(T::KIND, member.key_name());
        }
        Ok(())
    }

    fn remove(
        &self,
        value: &SlotValue,
        character: &mut Character,
        registry: &ReferenceRegistry,
    ) -> Result<()> {
        let members = self.typed(value)?.members(registry);
        debug!(
            character = character.name(),
            kind = %T::KIND,
            count = members.len(),
            "removing proficiencies"
        );
        for member in &members {
            character.remove_proficiency(T::KIND, member.key_name());
        }
        Ok(())
    }
}
