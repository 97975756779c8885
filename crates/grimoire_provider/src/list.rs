//! Typed list slots.
//!
//! An entity owns one ordered list per [`ListKeyId`]. Storage is type
//! erased, but the typed [`ListKey`] constants bind each slot to exactly one
//! element type, and every typed read checks it. A value of the wrong type
//! can only get in through [`ListStore::add_raw`], and is reported as
//! `SlotTypeMismatch` the first time it is read, never skipped.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use grimoire_foundation::{Error, Result};
use tracing::error;

use crate::provider::{ArmorProfProvider, ShieldProfProvider};

/// A type-erased value stored in a slot.
pub type SlotValue = Arc<dyn Any + Send + Sync>;

/// The closed set of list slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListKeyId {
    /// Shield proficiencies granted automatically.
    AutoShieldProf,
    /// Armor proficiencies granted automatically.
    AutoArmorProf,
}

impl ListKeyId {
    /// Returns the slot name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AutoShieldProf => "AUTO_SHIELDPROF",
            Self::AutoArmorProf => "AUTO_ARMORPROF",
        }
    }
}

impl fmt::Display for ListKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A slot identifier bound to its element type `V`.
pub struct ListKey<V> {
    id: ListKeyId,
    element: &'static str,
    _element: PhantomData<fn() -> V>,
}

impl<V> ListKey<V> {
    const fn new(id: ListKeyId, element: &'static str) -> Self {
        Self {
            id,
            element,
            _element: PhantomData,
        }
    }

    /// The untyped slot identifier.
    #[must_use]
    pub const fn id(&self) -> ListKeyId {
        self.id
    }

    /// Name of the element type, for diagnostics.
    #[must_use]
    pub const fn element(&self) -> &'static str {
        self.element
    }
}

impl ListKey<ShieldProfProvider> {
    /// Slot for automatically granted shield proficiencies.
    pub const AUTO_SHIELDPROF: Self = Self::new(ListKeyId::AutoShieldProf, "ShieldProfProvider");
}

impl ListKey<ArmorProfProvider> {
    /// Slot for automatically granted armor proficiencies.
    pub const AUTO_ARMORPROF: Self = Self::new(ListKeyId::AutoArmorProf, "ArmorProfProvider");
}

impl<V> Clone for ListKey<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ListKey<V> {}

impl<V> fmt::Debug for ListKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListKey({}: {})", self.id, self.element)
    }
}

/// Ordered list slots.
///
/// Lists are persistent vectors, so cloning a store is cheap and shares
/// structure with the original.
#[derive(Clone, Default)]
pub struct ListStore {
    lists: HashMap<ListKeyId, im::Vector<SlotValue>>,
}

impl ListStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value and returns the stored instance.
    pub fn add_to_list<V: Any + Send + Sync>(&mut self, key: ListKey<V>, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.add_shared(key, Arc::clone(&value));
        value
    }

    /// Appends an already shared value.
    pub fn add_shared<V: Any + Send + Sync>(&mut self, key: ListKey<V>, value: Arc<V>) {
        self.add_raw(key.id(), value);
    }

    /// Appends a value without any type check.
    ///
    /// This is the only way to put a value of the wrong type into a slot.
    /// Typed reads of the slot will then fail with `SlotTypeMismatch`.
    pub fn add_raw(&mut self, id: ListKeyId, value: SlotValue) {
        self.lists.entry(id).or_default().push_back(value);
    }

    /// Returns the slot contents as `V`, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` if any stored value is not a `V`.
    pub fn list_for<V: Any + Send + Sync>(&self, key: ListKey<V>) -> Result<Vec<Arc<V>>> {
        self.raw(key.id())
            .map(|value| downcast_slot(key, value))
            .collect()
    }

    /// Iterates the untyped slot contents in stored order.
    pub fn raw(&self, id: ListKeyId) -> impl Iterator<Item = &SlotValue> {
        self.lists.get(&id).into_iter().flat_map(im::Vector::iter)
    }

    /// Removes one stored instance, matched by pointer identity.
    ///
    /// Returns false if that instance is not in the slot.
    pub fn remove_instance(&mut self, id: ListKeyId, value: &SlotValue) -> bool {
        let Some(list) = self.lists.get_mut(&id) else {
            return false;
        };
        let Some(pos) = list.iter().position(|stored| Arc::ptr_eq(stored, value)) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.lists.remove(&id);
        }
        true
    }

    /// Returns true if the slot holds this exact instance.
    #[must_use]
    pub fn contains_instance(&self, id: ListKeyId, value: &SlotValue) -> bool {
        self.raw(id).any(|stored| Arc::ptr_eq(stored, value))
    }

    /// Returns the number of values in a slot.
    #[must_use]
    pub fn len(&self, id: ListKeyId) -> usize {
        self.lists.get(&id).map_or(0, im::Vector::len)
    }

    /// Returns true if a slot holds nothing.
    #[must_use]
    pub fn is_empty(&self, id: ListKeyId) -> bool {
        self.len(id) == 0
    }

    /// Slots that hold at least one value, in key order.
    #[must_use]
    pub fn slots(&self) -> Vec<ListKeyId> {
        let mut ids: Vec<ListKeyId> = self.lists.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl fmt::Debug for ListStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for id in self.slots() {
            map.entry(&id, &self.len(id));
        }
        map.finish()
    }
}

/// Views one slot value as `V`.
///
/// # Errors
///
/// Returns `SlotTypeMismatch` if the value is not a `V`.
pub fn downcast_slot<V: Any + Send + Sync>(key: ListKey<V>, value: &SlotValue) -> Result<Arc<V>> {
    Arc::clone(value).downcast::<V>().map_err(|_| {
        error!(slot = %key.id(), expected = key.element(), "slot holds a foreign value");
        Error::slot_type_mismatch(key.id().name(), key.element())
    })
}
